//! Breakthrough of a contaminant spill in a 1D streamtube.
//!
//! Compares a finite-duration continuous release (Ogata-Banks pulse) with
//! an instantaneous spill of equivalent mass (Gaussian pulse) at a well
//! 25 m downgradient, then maps the plan-view plume of a 10 m wide
//! continuous source (Domenico).
//!
//! Run with: cargo run --example contaminant_plume

use hydrogeo_rs::models::{DomenicoPlume, GaussianPulse, OgataBanks};

const DAY: f64 = 86_400.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Seepage velocity 0.5 m/d, dispersivity 1 m, source 100 mg/L.
    let velocity = 0.5 / DAY;
    let column = OgataBanks::new(velocity, 1.0, 1e-9, 0.1)?;

    // 30-day release, observed at the downgradient well.
    let release = 30.0 * DAY;
    let x = 25.0;

    println!("Breakthrough at x = {x} m (30-day release):");
    println!("{:>8} {:>14}", "t [d]", "C [kg/m3]");
    for day in [10, 25, 50, 75, 100, 150, 250] {
        let c = column.pulse_concentration(x, day as f64 * DAY, release);
        println!("{:>8} {:>14.6}", day, c);
    }

    // Instantaneous spill of the same total mass into a streamtube of
    // 2 m² cross-section and porosity 0.3.
    let area = 2.0;
    let porosity = 0.3;
    let mass = 0.1 * velocity * area * porosity * release; // C0·v·A·n·τ
    let spill = GaussianPulse::new(mass, area, porosity, velocity, column.dispersion())?;

    println!("\nEquivalent instantaneous spill ({mass:.4} kg):");
    println!("{:>8} {:>12} {:>14}", "t [d]", "peak x [m]", "C(x=25) ");
    for day in [10, 25, 50, 75, 100] {
        let t = day as f64 * DAY;
        println!(
            "{:>8} {:>12.2} {:>14.6}",
            day,
            spill.peak_position(t),
            spill.concentration(x, t)
        );
    }

    // Plan view of the same continuous source with a 10 m width and a
    // transverse dispersivity one tenth of the longitudinal one.
    let plume = DomenicoPlume::new(velocity, 1.0, 0.1, 0.1, 10.0)?;
    let t = 100.0 * DAY;

    println!("\nPlan-view plume after 100 days (C [kg/m3]):");
    print!("{:>8}", "x [m]");
    for y in [0, 5, 10, 20] {
        print!(" {:>11}", format!("y = {y}"));
    }
    println!();
    for x in [5.0, 15.0, 25.0, 40.0, 60.0] {
        print!("{:>8}", x);
        for y in [0.0, 5.0, 10.0, 20.0] {
            print!(" {:>11.6}", plume.concentration(x, y, t));
        }
        println!();
    }

    Ok(())
}
