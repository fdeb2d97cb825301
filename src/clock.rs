use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::audio::decode::DecodedAudio;
use crate::audio::frames::FrameSource;
use crate::audio::spectrum::SpectrumAnalyzer;
use crate::map::{ParameterMapper, VisualParams};

/// Cooperative stop request, polled once at the top of each tick. A tick
/// already in progress always completes.
#[derive(Clone, Default)]
pub struct StopFlag {
    inner: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.inner.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}

/// Process-wide pipeline state: the session exclusively owns the PCM buffer
/// (through its frame source) and advances it one window per tick.
pub struct PipelineSession {
    frames: FrameSource,
    analyzer: SpectrumAnalyzer,
    mapper: Box<dyn ParameterMapper>,
    fps: u32,
    tick: u64,
}

impl PipelineSession {
    pub fn new(
        audio: DecodedAudio,
        window_len: usize,
        fps: u32,
        mapper: Box<dyn ParameterMapper>,
    ) -> Self {
        assert!(fps > 0, "tick rate must be nonzero");
        Self {
            frames: FrameSource::new(audio.samples, window_len),
            analyzer: SpectrumAnalyzer::new(window_len),
            mapper,
            fps,
            tick: 0,
        }
    }

    /// Full windows the source will yield; the number of Running ticks.
    pub fn total_ticks(&self) -> usize {
        self.frames.total_windows()
    }

    /// Whether a sub-window tail would be left over after the last full window.
    pub fn has_partial_tail(&self) -> bool {
        self.frames.remaining() % self.frames.window_len() != 0
    }

    pub fn elapsed(&self) -> f32 {
        self.tick as f32 / self.fps as f32
    }

    /// One Running tick: pull a window, analyze, map. `None` once the buffer
    /// holds less than one full window.
    pub fn advance(&mut self) -> Option<VisualParams> {
        let elapsed = self.elapsed();
        let spectrum = {
            let window = self.frames.next_window()?;
            self.analyzer.analyze(window)
        };
        let params = self.mapper.map(&spectrum, elapsed);
        self.tick += 1;
        Some(params)
    }

    /// Render the leftover tail as one zero-padded window, if any remains.
    pub fn drain_tail(&mut self) -> Option<VisualParams> {
        let elapsed = self.elapsed();
        let window = self.frames.take_tail_padded()?;
        let spectrum = self.analyzer.analyze(&window);
        let params = self.mapper.map(&spectrum, elapsed);
        self.tick += 1;
        Some(params)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Draining,
    Stopped,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockStats {
    pub running_ticks: u64,
    pub drained_ticks: u64,
}

/// Fixed-cadence tick loop over a session. Each tick polls the stop flag,
/// advances the pipeline, and hands the resulting parameter set to `emit`.
/// The loop never runs faster than the tick rate; under load it simply runs
/// slower. There is no frame skipping or catch-up.
pub struct RenderClock {
    interval: Duration,
    drain_partial_frame: bool,
    state: ClockState,
}

impl RenderClock {
    /// `fps` of 0 disables pacing (useful for offline tests).
    pub fn new(fps: u32, drain_partial_frame: bool) -> Self {
        let interval = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / fps as f64)
        };
        Self {
            interval,
            drain_partial_frame,
            state: ClockState::Running,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn run<F>(
        &mut self,
        session: &mut PipelineSession,
        stop: &StopFlag,
        mut emit: F,
    ) -> Result<ClockStats>
    where
        F: FnMut(&VisualParams) -> Result<()>,
    {
        let mut stats = ClockStats::default();

        while self.state != ClockState::Stopped {
            let tick_start = Instant::now();

            if stop.is_requested() {
                self.state = ClockState::Stopped;
                break;
            }

            match self.state {
                ClockState::Running => match session.advance() {
                    Some(params) => {
                        emit(&params)?;
                        stats.running_ticks += 1;
                    }
                    None => {
                        self.state = ClockState::Draining;
                        continue;
                    }
                },
                ClockState::Draining => {
                    if self.drain_partial_frame {
                        if let Some(params) = session.drain_tail() {
                            emit(&params)?;
                            stats.drained_ticks += 1;
                        }
                    }
                    self.state = ClockState::Stopped;
                    break;
                }
                ClockState::Stopped => break,
            }

            let spent = tick_start.elapsed();
            if spent < self.interval {
                std::thread::sleep(self.interval - spent);
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DotsConfig;
    use crate::map::dots::RadialDots;

    fn session(samples: usize, window_len: usize) -> PipelineSession {
        let audio = DecodedAudio {
            samples: vec![0.0; samples],
            sample_rate: 44100,
        };
        PipelineSession::new(
            audio,
            window_len,
            30,
            Box::new(RadialDots::new(DotsConfig::default())),
        )
    }

    #[test]
    fn two_and_a_half_windows_run_two_ticks() {
        let mut session = session(2560, 1024);
        assert_eq!(session.total_ticks(), 2);
        let mut clock = RenderClock::new(0, false);
        let stats = clock
            .run(&mut session, &StopFlag::new(), |_| Ok(()))
            .unwrap();
        assert_eq!(stats.running_ticks, 2);
        assert_eq!(stats.drained_ticks, 0);
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn drain_partial_frame_adds_one_tick() {
        let mut session = session(2560, 1024);
        assert!(session.has_partial_tail());
        let mut clock = RenderClock::new(0, true);
        let stats = clock
            .run(&mut session, &StopFlag::new(), |_| Ok(()))
            .unwrap();
        assert_eq!(stats.running_ticks, 2);
        assert_eq!(stats.drained_ticks, 1);
    }

    #[test]
    fn no_drain_tick_when_buffer_divides_evenly() {
        let mut session = session(2048, 1024);
        let mut clock = RenderClock::new(0, true);
        let stats = clock
            .run(&mut session, &StopFlag::new(), |_| Ok(()))
            .unwrap();
        assert_eq!(stats.running_ticks, 2);
        assert_eq!(stats.drained_ticks, 0);
    }

    #[test]
    fn stop_request_halts_before_the_next_tick() {
        let mut session = session(1024 * 100, 1024);
        let stop = StopFlag::new();
        stop.request();
        let mut clock = RenderClock::new(0, false);
        let stats = clock.run(&mut session, &stop, |_| Ok(())).unwrap();
        assert_eq!(stats.running_ticks, 0);
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn elapsed_time_follows_tick_count() {
        let mut s = session(1024 * 3, 1024);
        assert_eq!(s.elapsed(), 0.0);
        s.advance().unwrap();
        s.advance().unwrap();
        assert!((s.elapsed() - 2.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn emit_error_propagates() {
        let mut session = session(1024 * 4, 1024);
        let mut clock = RenderClock::new(0, false);
        let result = clock.run(&mut session, &StopFlag::new(), |_| {
            anyhow::bail!("sink went away")
        });
        assert!(result.is_err());
    }
}
