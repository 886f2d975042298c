// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example sample7 -- --hands 1000000
// ...
// Total hands      1000000
// Elapsed:         1.215s
// Hands/sec:       823045
// ```

use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::time::Instant;

use holdem_eval::{Deck, HandCategory, HandValue};

#[derive(Debug, Parser)]
struct Cli {
    /// Number of 7 cards hands to sample.
    #[clap(long, default_value_t = 1_000_000)]
    hands: usize,
    /// The random seed.
    #[clap(long, default_value_t = 101)]
    seed: u64,
}

fn main() {
    let cli = Cli::parse();
    let mut rng = StdRng::seed_from_u64(cli.seed);

    let now = Instant::now();
    let mut counts = [0usize; 11];

    for _ in 0..cli.hands {
        let mut deck = Deck::new_and_shuffled(&mut rng);
        let Ok(hand) = deck.draw(7) else { break };
        if let Ok(hv) = HandValue::eval(&hand) {
            counts[hv.category().ordinal() as usize] += 1;
        }
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for category in HandCategory::ALL {
        let count = counts[category.ordinal() as usize];
        println!(
            "{:<17}{count:>9} {:>8.4}%",
            format!("{category}:"),
            100.0 * count as f64 / total.max(1) as f64
        );
    }
}
