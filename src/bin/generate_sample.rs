//! Writes a synthetic pump test CSV for exercising the browser by hand:
//! `cargo run --bin generate_sample`, then upload `sample_pump_data.csv`.

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Quadratic head curve with a gas degradation factor and measurement noise.
fn head_ft(q_bpd: f64, shutoff_ft: f64, q_max_bpd: f64, gvf: f64, rng: &mut SimpleRng) -> f64 {
    let ratio = (q_bpd / q_max_bpd).min(1.0);
    let ideal = shutoff_ft * (1.0 - ratio * ratio);
    let degraded = ideal * (1.0 - 1.8 * gvf);
    (degraded + rng.gauss(0.0, 0.01 * shutoff_ft)).max(0.0)
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let pumps = [("TE2700", 320.0, 3200.0), ("DN1750", 360.0, 2400.0)];
    let cases = [("base", 0.0), ("gassy", 0.10)];
    let rpms = [3000_i64, 3500];
    let pressures = [50_i64, 100];
    let flow_points = 8;

    let output_path = "sample_pump_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Test",
            "Pump",
            "Case",
            "TargetRPM",
            "TargetP_psi",
            "QL_bpd",
            "QG_bpd",
            "DP_psi",
            "Head_ft",
            "Comments",
        ])
        .expect("Failed to write header");

    let mut test_no = 0;
    let mut n_rows = 0;
    for (pump, shutoff, q_max) in pumps {
        for (case, gvf) in cases {
            for rpm in rpms {
                for psi in pressures {
                    test_no += 1;
                    let test = format!("ST-{test_no:02}");
                    let speed_scale = rpm as f64 / 3500.0;
                    let comment = format!(
                        "Synthetic {case} curve for {pump} at {rpm} rpm. Intake pressure {psi} psig."
                    );

                    for i in 1..=flow_points {
                        let ql = q_max * speed_scale * i as f64 / flow_points as f64;
                        let qg = ql * gvf / (1.0 - gvf);
                        let head = head_ft(
                            ql,
                            shutoff * speed_scale * speed_scale,
                            q_max * speed_scale,
                            gvf,
                            &mut rng,
                        );
                        // Fresh water: 1 psi per 2.31 ft of head.
                        let dp = head / 2.31;

                        let record = [
                            test.clone(),
                            pump.to_string(),
                            case.to_string(),
                            rpm.to_string(),
                            psi.to_string(),
                            format!("{ql:.0}"),
                            format!("{qg:.0}"),
                            format!("{dp:.1}"),
                            format!("{head:.1}"),
                            comment.clone(),
                        ];
                        writer.write_record(&record).expect("Failed to write row");
                        n_rows += 1;
                    }
                }
            }
        }
    }

    writer.flush().expect("Failed to flush output file");
    println!("Wrote {n_rows} rows across {test_no} tests to {output_path}");
}
