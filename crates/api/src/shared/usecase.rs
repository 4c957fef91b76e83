use remind_infra::RemindContext;
use tracing::error;

/// Subscriber on the success result of a `UseCase`
#[async_trait::async_trait(?Send)]
pub trait Subscriber<U: UseCase> {
    async fn notify(&self, e: &U::Response, ctx: &RemindContext);
}

#[async_trait::async_trait(?Send)]
pub trait UseCase {
    type Response;
    type Error;

    /// UseCase name identifier
    const NAME: &'static str;

    async fn execute(&mut self, ctx: &RemindContext) -> Result<Self::Response, Self::Error>;

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>>
    where
        Self: Sized,
    {
        Vec::new()
    }
}

#[tracing::instrument(name = "Executing usecase", skip(usecase, ctx), fields(usecase = U::NAME))]
pub async fn execute<U>(mut usecase: U, ctx: &RemindContext) -> Result<U::Response, U::Error>
where
    U: UseCase,
    U::Error: std::fmt::Debug,
{
    let res = usecase.execute(ctx).await;

    match &res {
        Ok(success_res) => {
            let subscribers = U::subscribers();
            let mut publish_futures = Vec::with_capacity(subscribers.len());
            for subscriber in &subscribers {
                publish_futures.push(subscriber.notify(success_res, ctx));
            }
            futures::future::join_all(publish_futures).await;
        }
        Err(e) => {
            error!("Use case error: {:?}", e);
        }
    }

    res
}
