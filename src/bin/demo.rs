//! Minimizes the Rosenbrock function from `[5, 5]` and reports the result.

use std::time::Instant;

use compass_search::objectives::rosenbrock;
use compass_search::vector::CompassSearch;
use ndarray::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let x0 = arr1(&[5.0, 5.0]);
    let search = CompassSearch::<f64>::default();

    let start = Instant::now();
    let res = search.minimize(rosenbrock, x0.view())?;
    let elapsed = start.elapsed();

    println!("Min: {}", res.minimum_value);
    print!("Found at: [ ");
    for xi in res.minimum.iter() {
        print!("{} ", xi);
    }
    println!("]");
    println!("Elapsed time: {}s", elapsed.as_secs_f64());
    println!("Iterations: {}", res.iterations);

    Ok(())
}
