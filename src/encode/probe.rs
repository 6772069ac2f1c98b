use crate::foundation::error::{ApngenError, ApngenResult};

/// Container metadata read back from an encoded artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationInfo {
    pub width: u32,
    pub height: u32,
    /// Number of frames actually decoded.
    pub frame_count: u32,
    /// `0` is infinite.
    pub loop_count: u32,
    /// Delay of each decoded frame, rounded to whole milliseconds.
    pub delays_ms: Vec<u32>,
}

/// Decode every frame of an (A)PNG and report its animation metadata.
///
/// A still PNG reports one frame with no delay and a loop count of 0.
pub fn probe_apng(bytes: &[u8]) -> ApngenResult<AnimationInfo> {
    let decoder = png::Decoder::new(bytes);
    let mut reader = decoder.read_info()?;
    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let Some(actl) = reader.info().animation_control else {
        let mut buf = vec![0u8; reader.output_buffer_size()];
        reader.next_frame(&mut buf)?;
        return Ok(AnimationInfo {
            width,
            height,
            frame_count: 1,
            loop_count: 0,
            delays_ms: Vec::new(),
        });
    };

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let mut delays_ms = Vec::with_capacity(actl.num_frames as usize);
    for _ in 0..actl.num_frames {
        reader.next_frame(&mut buf)?;
        let fctl = reader
            .info()
            .frame_control
            .ok_or_else(|| ApngenError::decode("animated frame without fcTL"))?;
        delays_ms.push(delay_ms(fctl.delay_num, fctl.delay_den));
    }
    Ok(AnimationInfo {
        width,
        height,
        frame_count: delays_ms.len() as u32,
        loop_count: actl.num_plays,
        delays_ms,
    })
}

// A zero denominator means hundredths of a second.
fn delay_ms(num: u16, den: u16) -> u32 {
    let den = if den == 0 { 100 } else { u32::from(den) };
    (u32::from(num) * 1000 + den / 2) / den
}

#[cfg(test)]
#[path = "../../tests/unit/encode/probe.rs"]
mod tests;
