use std::time::Duration;
use tracing::debug;

/// 固定间隔限速
///
/// 每次产品请求之后（无论成功失败）都等待同样的时长，这是唯一的限速手段
#[derive(Debug, Clone, Copy)]
pub struct RequestThrottle {
    delay: Duration,
}

impl RequestThrottle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// 等待一个固定间隔
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!("⏳ 等待 {} 秒后继续下一个请求", self.delay.as_secs());
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn pause_waits_the_full_delay() {
        let throttle = RequestThrottle::new(Duration::from_secs(50));
        let start = Instant::now();
        throttle.pause().await;
        assert!(start.elapsed() >= Duration::from_secs(50));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_returns_immediately() {
        let throttle = RequestThrottle::new(Duration::ZERO);
        let start = Instant::now();
        throttle.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
