/// Smallest possible use of the engine: a 3-3-3 sigmoid network queried once
/// before and once after a few hundred steps on a single sample.
///
/// Run with:
///   cargo run --example tiny
use neuro_mlp::{Network, NetworkConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> neuro_mlp::Result<()> {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::new(&NetworkConfig::new(3, 3, 3, 0.3), &mut rng)?;

    let input = [1.0, 0.5, -1.5];
    let target = [0.99, 0.01, 0.01];

    println!("before: {:.4?}", network.query(&input)?);
    for _ in 0..500 {
        network.train(&input, &target)?;
    }
    println!("after:  {:.4?}", network.query(&input)?);

    Ok(())
}
