//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `roulette_pay_core` linkage without the Flutter runtime.
//! - Play one headless selection and split a sample bill.
//!
//! Usage: `roulette_pay_cli [seed] [payers] [amount] [names...]`.

use rand::Rng;
use roulette_pay_core::{
    divide, parse_amount, EngineResult, Member, RandomRotation, SelectionSession, SelectionState,
    SpinConfig,
};
use std::process::ExitCode;

const DEFAULT_NAMES: [&str; 4] = ["Aki", "Ben", "Chie", "Dai"];

fn main() -> ExitCode {
    println!("roulette_pay_core ping={}", roulette_pay_core::ping());
    println!("roulette_pay_core version={}", roulette_pay_core::core_version());

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match run_demo(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("demo failed: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_demo(args: &[String]) -> Result<(), String> {
    let seed = match args.first() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| format!("seed must be an unsigned integer, got `{raw}`"))?,
        None => rand::thread_rng().gen(),
    };
    let payers = match args.get(1) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| format!("payers must be an unsigned integer, got `{raw}`"))?,
        None => 2,
    };
    let amount_text = args.get(2).map(String::as_str).unwrap_or("1000");
    let names = if args.len() > 3 {
        args[3..].iter().map(String::as_str).collect::<Vec<_>>()
    } else {
        DEFAULT_NAMES.to_vec()
    };

    let members = names.iter().map(|name| Member::new(*name)).collect::<Vec<_>>();
    let winners = play(members, payers, seed).map_err(|err| err.to_string())?;
    let total = parse_amount(amount_text).map_err(|err| err.to_string())?;
    let ids = winners.iter().map(|member| member.id).collect::<Vec<_>>();
    let Some(&recipient) = ids.last() else {
        return Err("no payer selected".to_string());
    };
    let shares = divide(total, &ids, recipient).map_err(|err| err.to_string())?;

    println!("seed={seed} total={total}");
    for (winner, share) in winners.iter().zip(shares) {
        println!("payer={} amount={}", winner.name, share.amount);
    }
    Ok(())
}

fn play(members: Vec<Member>, payers: usize, seed: u64) -> EngineResult<Vec<Member>> {
    let config = SpinConfig::default();
    let mut rotation = RandomRotation::seeded(seed, &config);
    let mut session = SelectionSession::new(members, config)?;
    session.start(payers)?;

    while !session.is_complete() {
        session.spin(&mut rotation)?;
        if matches!(session.state(), SelectionState::Spinning { .. }) {
            session.frame(config.spin_duration())?;
        }
        if let SelectionState::ResultPending { round, winner } = session.state() {
            println!("round={round} winner={}", winner.name);
        }
        session.confirm()?;
    }
    Ok(session.outcome()?.into_winners())
}
