use anyhow::{bail, Context, Result};
use pantokit::{decode, encode, forward, inverse, AnglePair, MechanismConfig};
use std::path::PathBuf;

const USAGE: &str = "\
Usage:
  pantokit pmd2svg <input1.pmd> [input2.pmd ...] <output.svg>
  pantokit svg2pmd <input.svg> <output_directory>
  pantokit selftest

Options:
  --config <file.toml>   Mechanism dimensions (defaults to the reference device)
";

fn main() -> Result<()> {
    pantokit::init_logging()?;

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config = extract_config(&mut args)?;

    match args.split_first() {
        Some((command, rest)) => match command.as_str() {
            "pmd2svg" => pmd2svg(rest, &config),
            "svg2pmd" => svg2pmd(rest, &config),
            "selftest" => selftest(&config),
            other => {
                eprint!("Unknown command '{other}'\n\n{USAGE}");
                std::process::exit(2);
            }
        },
        None => {
            print!("{USAGE}");
            Ok(())
        }
    }
}

/// Pulls `--config <path>` out of the argument list, loading the file
/// if present.
fn extract_config(args: &mut Vec<String>) -> Result<MechanismConfig> {
    if let Some(index) = args.iter().position(|a| a == "--config") {
        if index + 1 >= args.len() {
            bail!("--config requires a file path");
        }
        let path = args.remove(index + 1);
        args.remove(index);
        return MechanismConfig::load(&path)
            .with_context(|| format!("Failed to load mechanism config {path}"));
    }
    Ok(MechanismConfig::default())
}

/// Decode direction: N PMD files to one SVG. A failing input is
/// reported and skipped; the batch continues.
fn pmd2svg(args: &[String], config: &MechanismConfig) -> Result<()> {
    let Some((output, inputs)) = args.split_last().filter(|(_, inputs)| !inputs.is_empty())
    else {
        print!("{USAGE}");
        return Ok(());
    };

    let inputs: Vec<PathBuf> = inputs.iter().map(PathBuf::from).collect();
    let output = PathBuf::from(output);
    let items = decode::run(&inputs, &output, config)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    for item in &items {
        if let Err(error) = &item.result {
            eprintln!("Error processing file {}: {}", item.source.display(), error);
        }
    }
    println!("Successfully written to {}", output.display());
    Ok(())
}

/// Encode direction: one SVG to one PMD file per title label.
fn svg2pmd(args: &[String], config: &MechanismConfig) -> Result<()> {
    let [input, output_dir] = args else {
        print!("{USAGE}");
        return Ok(());
    };

    let outcome = encode::run(
        input.as_ref(),
        output_dir.as_ref(),
        config,
    )
    .with_context(|| format!("Failed to convert {input}"))?;

    for (label, error) in &outcome.skipped {
        eprintln!("Error processing path {label}: {error}");
    }
    for path in &outcome.written {
        println!("Written to {}", path.display());
    }
    Ok(())
}

/// Runs the kinematics round trip on two known arm poses and prints
/// the results.
fn selftest(config: &MechanismConfig) -> Result<()> {
    let poses = [
        AnglePair::new(45.0, 135.0),
        AnglePair::new(43.12949752807617, 89.9292221069336),
    ];

    for angles in poses {
        println!("Original Angles: ({}, {})", angles.left_deg, angles.right_deg);
        let coords = forward(angles, config)?;
        println!("Coordinates: ({}, {})", coords.x, coords.y);
        let restored = inverse(coords, config)?;
        println!(
            "Restored Angles: ({}, {})",
            restored.left_deg, restored.right_deg
        );
        println!("{}", "-".repeat(40));
    }
    Ok(())
}
