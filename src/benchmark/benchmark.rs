use std::time::Instant;
use crate::simulation::states::{Lattice, NVec3, VortexPanel};
use crate::simulation::params::Parameters;
use crate::simulation::flow::Compressibility;
use crate::simulation::influence::{HorseshoeInduction, InducedVelocity, OnsetFlow, ParallelHorseshoeInduction, VelocitySet};
use crate::simulation::relaxation::{relaxation_step, relaxation_step_parallel};

/// Helper to build a manual Lattice of size `n`
/// Deterministic scattered panels with nonzero strengths, no rand needed
fn make_lattice(n: usize) -> Lattice {
    let mut panels = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        let mut p = VortexPanel::new(0.2, 0.1, x, NVec3::z());
        p.set_strength((i_f * 0.11).cos());
        panels.push(p);
    }

    Lattice::new(panels)
}

/// Time one full accumulation pass, direct vs rayon-partitioned
pub fn bench_accumulation() {
    // Different lattice sizes to test
    let ns = [200, 400, 800, 1600, 3200];
    let flow = Compressibility::from_mach(0.5);

    for n in ns {
        let lattice = make_lattice(n);
        let mut out = vec![NVec3::zeros(); n];

        let direct = HorseshoeInduction { flow };
        let parallel = ParallelHorseshoeInduction { flow };

        // Warm up
        direct.velocity(&lattice, &mut out);
        parallel.velocity(&lattice, &mut out);

        // Time direct
        let t0 = Instant::now();
        direct.velocity(&lattice, &mut out);
        let dt_direct = t0.elapsed().as_secs_f64();

        // Time parallel
        let t1 = Instant::now();
        parallel.velocity(&lattice, &mut out);
        let dt_parallel = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, direct = {:8.6} s, parallel = {:8.6} s", dt_direct, dt_parallel);
    }
}

/// Benchmark full relaxation steps for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_relaxation_curve() {
    println!("N,direct_ms,parallel_ms");

    let params = Parameters {
        compressibility: Compressibility::from_mach(0.5),
        ..Parameters::default()
    };
    let flow = params.compressibility;

    for n in (200..=2000).step_by(200) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };

        let template = make_lattice(n);

        let mut lattice_direct = template.clone();
        let velocities_direct = VelocitySet::new()
            .with(HorseshoeInduction { flow })
            .with(OnsetFlow { speed: params.onset_speed });

        let t0 = Instant::now();
        for _ in 0..steps {
            relaxation_step(&mut lattice_direct, &velocities_direct, &params);
        }
        let ms_direct = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut lattice_parallel = template.clone();
        let velocities_parallel = VelocitySet::new()
            .with(ParallelHorseshoeInduction { flow })
            .with(OnsetFlow { speed: params.onset_speed });

        let t1 = Instant::now();
        for _ in 0..steps {
            relaxation_step_parallel(&mut lattice_parallel, &velocities_parallel, &params);
        }
        let ms_parallel = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_direct, ms_parallel);
    }
}
