// Driftnet Simulation Engine - Node Naming
//
// Nodes are labeled with distinct human first names so the renderer can show
// a readable label inside each node. Sampling is seeded, so a run's labels
// are reproducible along with its trajectory.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Label pool. Large enough that uniqueness sampling terminates quickly for
/// realistic node counts; overflow falls back to numbered labels.
const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Alice", "Amara", "Anders", "Anna", "Astrid", "Bela",
    "Boris", "Carla", "Chen", "Clara", "Dana", "David", "Dmitri", "Edith",
    "Elena", "Emil", "Erik", "Fatima", "Felix", "Freya", "Grace", "Hana",
    "Hugo", "Ines", "Ivan", "Jonas", "Julia", "Karim", "Katja", "Kenji",
    "Lars", "Leila", "Lena", "Liam", "Lucia", "Maja", "Marco", "Marta",
    "Mika", "Nadia", "Nils", "Noor", "Olga", "Omar", "Paula", "Pavel",
    "Priya", "Rafael", "Rosa", "Sam", "Sofia", "Stefan", "Tara", "Theo",
    "Uma", "Vera", "Viktor", "Wei", "Yara", "Yusuf", "Zara", "Zoe",
];

/// Draw `count` distinct names. Names are sampled with rejection on
/// duplicates, like the original uniqueness retry loop; if the pool is
/// exhausted the remainder gets deterministic `node-N` labels.
pub fn unique_names(rng: &mut ChaCha8Rng, count: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(count);
    for i in 0..count {
        if names.len() >= FIRST_NAMES.len() {
            names.push(format!("node-{}", i));
            continue;
        }
        loop {
            let candidate = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            if !names.iter().any(|n| n == candidate) {
                names.push(candidate.to_string());
                break;
            }
        }
    }
    names
}
