//! Writes `sample_capture.csv`: a synthetic walker laid out like a capture
//! export (frame counter, X/Y/Z per marker, trailing empty padding columns).

use anyhow::{Context, Result};

const FRAMES: usize = 240;
const CAPTURE_HZ: f64 = 120.0;
const PADDING_COLUMNS: usize = 6;

/// Marker rest positions in millimetres: (lateral y, height z, swing phase, swing amplitude).
const MARKERS: &[(&str, f64, f64, f64, f64)] = &[
    ("head", 0.0, 1700.0, 0.0, 0.0),
    ("l_shoulder", -180.0, 1450.0, 0.5, 30.0),
    ("r_shoulder", 180.0, 1450.0, 0.0, 30.0),
    ("l_elbow", -220.0, 1150.0, 0.5, 120.0),
    ("r_elbow", 220.0, 1150.0, 0.0, 120.0),
    ("l_wrist", -230.0, 880.0, 0.5, 220.0),
    ("r_wrist", 230.0, 880.0, 0.0, 220.0),
    ("l_hip", -120.0, 950.0, 0.0, 40.0),
    ("r_hip", 120.0, 950.0, 0.5, 40.0),
    ("l_knee", -120.0, 520.0, 0.0, 180.0),
    ("r_knee", 120.0, 520.0, 0.5, 180.0),
    ("l_ankle", -120.0, 90.0, 0.0, 320.0),
    ("r_ankle", 120.0, 90.0, 0.5, 320.0),
];

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

    /// Uniform jitter in `[-amount, amount)`.
    fn jitter(&mut self, amount: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amount
    }
}

/// X (walking direction), Y (lateral), Z (up) of one marker at time `t`.
fn marker_position(marker: (f64, f64, f64, f64), t: f64, rng: &mut SimpleRng) -> [f64; 3] {
    let (lateral, height, phase, amplitude) = marker;
    let stride_hz = 0.9;
    let cycle = 2.0 * std::f64::consts::PI * (stride_hz * t + phase);
    let progress = 1300.0 * t;
    let bob = 25.0 * (2.0 * cycle).cos();
    // Lower leg markers lift on the forward swing.
    let lift = if height < 600.0 { 60.0 * cycle.sin().max(0.0) } else { 0.0 };
    [
        progress + amplitude * cycle.sin() + rng.jitter(1.5),
        lateral + rng.jitter(1.5),
        height + bob + lift + rng.jitter(1.5),
    ]
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_capture.csv";
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    for frame in 0..FRAMES {
        let t = frame as f64 / CAPTURE_HZ;
        let mut record = vec![frame.to_string()];
        for &(_, lateral, height, phase, amplitude) in MARKERS {
            let [x, y, z] = marker_position((lateral, height, phase, amplitude), t, &mut rng);
            record.extend([format!("{x:.3}"), format!("{y:.3}"), format!("{z:.3}")]);
        }
        record.extend(std::iter::repeat(String::new()).take(PADDING_COLUMNS));
        writer
            .write_record(&record)
            .with_context(|| format!("writing frame {frame}"))?;
    }
    writer.flush().context("flushing sample capture")?;

    let threshold = 1 + MARKERS.len() * 3;
    println!(
        "Wrote {FRAMES} frames of {} markers to {output_path}\n\
         Render with: pointlight {output_path} --leading-columns 1 --padding-threshold {threshold} --drop-y --axes x,z -o frames",
        MARKERS.len()
    );
    Ok(())
}
