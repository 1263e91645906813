use std::path::Path;

// One stereo frame of audio
#[derive(Clone, Copy, Debug, Default)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

#[derive(Clone, Debug)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>,
}

impl SampleBuffer {
    // Decode a WAV file into stereo frames at the device rate. Mono files
    // are duplicated to both channels; other channel counts take the first
    // two. Sample rates are matched with a linear resampler.
    pub fn load_wav(path: &Path, target_rate: u32) -> anyhow::Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let channels = spec.channels as usize;
        let frames: Vec<StereoFrame> = match channels {
            0 => anyhow::bail!("WAV file has no channels: {}", path.display()),
            1 => samples
                .into_iter()
                .map(|x| StereoFrame { left: x, right: x })
                .collect(),
            n => samples
                .chunks_exact(n)
                .map(|c| StereoFrame { left: c[0], right: c[1] })
                .collect(),
        };

        let frames = if spec.sample_rate == target_rate {
            frames
        } else {
            resample_linear(&frames, spec.sample_rate, target_rate)
        };

        Ok(Self { data: frames })
    }
}

fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate || frames.is_empty() {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src_pos = i as f64 / ratio;
        let idx = src_pos.floor() as usize;
        let frac = (src_pos - idx as f64) as f32;
        if idx + 1 >= frames.len() {
            out.push(frames[frames.len() - 1]);
        } else {
            let a = frames[idx];
            let b = frames[idx + 1];
            out.push(StereoFrame {
                left: a.left * (1.0 - frac) + b.left * frac,
                right: a.right * (1.0 - frac) + b.right * frac,
            });
        }
    }
    out
}
