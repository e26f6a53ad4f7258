use crate::aws::client::StackClient;
use crate::aws::regions::RegionalClients;
use futures::future;
use std::future::Future;
use std::sync::Arc;

/// Run `op` against every regional client at once and wait for all of them
///
/// Each region gets its own task, results come back after the last task has
/// finished, in region order. A task which panics is logged and contributes
/// nothing, the other regions are still awaited.
pub async fn fan_out<T, F, Fut>(clients: &RegionalClients, op: F) -> Vec<T>
where
    F: Fn(Arc<dyn StackClient>) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let (regions, handles): (Vec<_>, Vec<_>) = clients
        .iter()
        .map(|(region, client)| (region.to_string(), tokio::spawn(op(Arc::clone(client)))))
        .unzip();

    future::join_all(handles)
        .await
        .into_iter()
        .zip(regions)
        .filter_map(|(result, region)| {
            result
                .inspect_err(|e| log::error!("{region} -- worker did not finish: {e}"))
                .ok()
        })
        .collect()
}
