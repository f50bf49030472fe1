use std::pin::Pin;

type Task = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A multi-threaded tokio runtime driven from its own OS thread, so that
/// synchronous callers (the UI loop, plain tests) can hand it work.
pub struct TokioThread {
    tx: tokio::sync::mpsc::Sender<Task>,
    _tokio_thread_handle: std::thread::JoinHandle<()>,
}
impl TokioThread {
    const QUEUE_SIZE: usize = 100;

    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (tx, mut rx) = tokio::sync::mpsc::channel::<Task>(Self::QUEUE_SIZE);

        let tokio_thread_handle = std::thread::Builder::new()
            .name("encore-tokio".to_string())
            .spawn(move || {
                runtime.block_on(async {
                    while let Some(task) = rx.recv().await {
                        tokio::spawn(task);
                    }
                });
            })?;

        Ok(Self {
            tx,
            _tokio_thread_handle: tokio_thread_handle,
        })
    }

    /// Queue `task` onto the runtime. Must not be called from inside the
    /// runtime itself.
    pub fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
        if self.tx.blocking_send(Box::pin(task)).is_err() {
            tracing::error!("tokio thread has shut down, dropping task");
        }
    }
}
