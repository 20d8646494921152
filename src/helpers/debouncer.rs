use std::sync::Arc;
use std::time::Duration;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

type Action = Arc<dyn Fn(String) -> BoxFuture<'static, ()> + Send + Sync>;

/// Runs `action` with the last scheduled text once `delay` passes without a
/// newer call to `schedule`.
pub struct Debouncer {
    delay: Duration,
    action: Action,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new<F>(delay: Duration, action: F) -> Self
    where
        F: Fn(String) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self {
            delay,
            action: Arc::new(action),
            pending: None,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, text: String) {
        self.cancel_pending();

        let delay = self.delay;
        let action = self.action.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action(text).await;
        }));
    }

    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::Mutex;

    fn recording_debouncer(fired: Arc<Mutex<Vec<String>>>) -> Debouncer {
        Debouncer::new(DEFAULT_DEBOUNCE, move |text| {
            let fired = fired.clone();
            async move {
                fired.lock().unwrap().push(text);
            }
            .boxed()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_last_keystroke_fires() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut debouncer = recording_debouncer(fired.clone());

        debouncer.schedule("piz".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("pizz".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("pizza".to_string());
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*fired.lock().unwrap(), vec!["pizza".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_schedule_never_fires() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut debouncer = recording_debouncer(fired.clone());

        debouncer.schedule("sushi".to_string());
        assert!(debouncer.is_pending());
        debouncer.cancel_pending();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(fired.lock().unwrap().is_empty());
    }
}
