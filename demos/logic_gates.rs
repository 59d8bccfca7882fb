use brainlet::train::evaluate::mean_error;
use brainlet::{train, Example, Network, ShuffledCycle, TrainConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::random(&[2, 2, 1], &mut rng).expect("valid topology");

    let truth_table = vec![
        Example::new(vec![0.0, 0.0], vec![0.0]),
        Example::new(vec![0.0, 1.0], vec![0.0]),
        Example::new(vec![1.0, 0.0], vec![0.0]),
        Example::new(vec![1.0, 1.0], vec![1.0]),
    ];

    let mut source = ShuffledCycle::new(truth_table.clone(), rng);
    let config = TrainConfig::new()
        .with_total_steps(1_000_000)
        .with_min_error(0.0)
        .with_log_every(100_000);

    let report = train(&mut network, &mut source, &config).expect("training failed");
    println!("Stopped: {:?} after {} steps", report.state, report.steps);
    println!("Mean error: {:.6}", mean_error(&network, &truth_table));

    for example in &truth_table {
        println!(
            "Input: {:?} -> Output: {:.4}",
            example.input,
            network.predict(&example.input)[0]
        );
    }
}
