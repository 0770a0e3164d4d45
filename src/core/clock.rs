//! 帧时钟模块
//!
//! 提供渲染循环使用的单调时间源。时钟是显式实例，由帧循环持有，
//! 不依赖任何全局可变状态。
//!
//! # 设计说明
//!
//! - 基于 `std::time::Instant`，单调，不受系统时钟调整影响
//! - `tick()` 同时给出自上次采样的增量时间和总运行时间
//! - 帧率计算对零增量显式防护，不会除零产生 NaN

use std::time::Instant;

/// 帧时钟
///
/// 记录起始时刻和上次采样时刻，按需产生时间样本。
///
/// # 示例
///
/// ```
/// use hello_gpu::core::clock::FrameClock;
///
/// let mut clock = FrameClock::start();
/// let sample = clock.tick();
/// assert!(sample.delta_seconds >= 0.0);
/// assert!(sample.total_seconds >= sample.delta_seconds);
/// ```
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// 时钟起始时刻
    origin: Instant,
    /// 上次 `tick()` 采样时刻
    last: Instant,
}

/// 一次时钟采样
///
/// 由 [`FrameClock::tick`] 产生，驱动与帧率无关的更新和标题栏诊断。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// 自上次采样以来的间隔（秒）
    pub delta_seconds: f64,
    /// 自时钟启动以来的总时间（秒）
    pub total_seconds: f64,
}

impl FrameClock {
    /// 启动一个新时钟
    ///
    /// 起始时刻即当前时刻，第一次 `tick()` 的增量相对于此计算。
    pub fn start() -> Self {
        let now = Instant::now();
        Self { origin: now, last: now }
    }

    /// 当前时刻距时钟启动的秒数
    ///
    /// 只读采样，不影响 `tick()` 的增量计算。
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    /// 采样一帧
    ///
    /// 返回自上次 `tick()`（首次为时钟启动）以来的增量时间
    /// 和总运行时间。
    pub fn tick(&mut self) -> FrameSample {
        let now = Instant::now();
        let sample = FrameSample {
            delta_seconds: now.duration_since(self.last).as_secs_f64(),
            total_seconds: now.duration_since(self.origin).as_secs_f64(),
        };
        self.last = now;
        sample
    }
}

impl FrameSample {
    /// 瞬时帧率（上次增量的倒数）
    ///
    /// 计数器分辨率不足时增量可能恰好为零，此时返回 `None`，
    /// 调用方显示"不可用"而不是除零。
    ///
    /// # 示例
    ///
    /// ```
    /// use hello_gpu::core::clock::FrameSample;
    ///
    /// let sample = FrameSample { delta_seconds: 0.02, total_seconds: 1.0 };
    /// assert_eq!(sample.frames_per_second(), Some(50.0));
    ///
    /// let stalled = FrameSample { delta_seconds: 0.0, total_seconds: 1.0 };
    /// assert_eq!(stalled.frames_per_second(), None);
    /// ```
    pub fn frames_per_second(&self) -> Option<f64> {
        if self.delta_seconds > 0.0 {
            Some(1.0 / self.delta_seconds)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_deltas_telescope_to_total() {
        let mut clock = FrameClock::start();

        let first = clock.tick();
        let mut sum = 0.0;
        let mut last = first;
        for _ in 0..5 {
            sleep(Duration::from_millis(2));
            last = clock.tick();
            sum += last.delta_seconds;
        }

        // 后续增量之和等于总时间之差
        assert!((sum - (last.total_seconds - first.total_seconds)).abs() < 1e-6);
    }

    #[test]
    fn test_now_is_monotonic() {
        let clock = FrameClock::start();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(a >= 0.0);
    }

    #[test]
    fn test_first_tick_measures_from_start() {
        let mut clock = FrameClock::start();
        sleep(Duration::from_millis(2));
        let sample = clock.tick();
        assert!(sample.delta_seconds > 0.0);
        assert!((sample.delta_seconds - sample.total_seconds).abs() < 1e-3);
    }

    #[test]
    fn test_fps_guards_zero_delta() {
        let stalled = FrameSample { delta_seconds: 0.0, total_seconds: 5.0 };
        assert_eq!(stalled.frames_per_second(), None);

        let sample = FrameSample { delta_seconds: 0.25, total_seconds: 5.0 };
        assert_eq!(sample.frames_per_second(), Some(4.0));
    }
}
