//! Excavation dewatering design with the coupled Thiem/Sichardt solve.
//!
//! Sweeps the pumping rate, reporting the radius of influence and well
//! head for each, and flags the rate at which the well would run dry.
//! For the selected rate, the MNW loss model estimates the additional
//! in-well head loss.
//!
//! Run with: cargo run --example thiem_dewatering

use hydrogeo_rs::models::{MnwWell, ThiemWell, WellState};
use hydrogeo_rs::physics::ParameterSpec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Unconfined aquifer: K = 1e-3 m/s, water table 50 m above base,
    // well radius 0.3 m.
    let well = ThiemWell::unconfined(1e-3, 50.0, 0.3)?;

    // Admissible pump sizes for this rig; out-of-range requests are clamped.
    let rate_spec = ParameterSpec::new("pumping rate Q", "L/s", 1.0, 2000.0, 50.0)?;

    println!("Rate sweep:");
    println!(
        "{:>10} {:>12} {:>12} {:>8}",
        "Q [L/s]", "R [m]", "h_w [m]", "state"
    );
    for requested in [10.0, 25.0, 50.0, 100.0, 250.0, 2000.0, 5000.0] {
        let q = rate_spec.clamp(requested);
        if q != requested {
            println!("  (requested {requested} L/s clamped to {q} L/s)");
        }
        let state = well.radius_of_influence(q / 1000.0);
        match state {
            WellState::Converged {
                radius, well_head, ..
            } => println!("{:>10} {:>12.1} {:>12.2} {:>8}", q, radius, well_head, "ok"),
            WellState::MaxIterExceeded { radius, well_head } => println!(
                "{:>10} {:>12.1} {:>12.2} {:>8}",
                q, radius, well_head, "approx"
            ),
            WellState::Dry { radius } => {
                println!("{:>10} {:>12.1} {:>12} {:>8}", q, radius, "-", "DRY")
            }
        }
    }

    // Design rate: 50 L/s. Head profile toward the excavation.
    let q = 0.05;
    let state = well.radius_of_influence(q);
    let radius = state.radius();

    println!("\nHead profile at Q = 50 L/s (R = {radius:.1} m):");
    println!("{:>10} {:>10}", "r [m]", "h [m]");
    for r in [0.3, 1.0, 5.0, 20.0, 50.0, radius] {
        println!("{:>10.1} {:>10.2}", r, well.head_clamped(q, r, radius));
    }

    // In-well losses at the design rate.
    let loss_model = MnwWell::new(6.0, 2.5, 80.0, 2.0)?;
    println!(
        "\nAdditional well loss at Q = 50 L/s: {:.2} m",
        loss_model.head_loss(q)
    );

    Ok(())
}
