//! CryptoTask resolution semantics

use jwtkit_common::{CryptoTask, Error, ErrorKind};

#[tokio::test]
async fn test_task_resolves_with_work_result() {
    let task = CryptoTask::spawn("square", || Ok(7u64 * 7));
    assert_eq!(task.operation(), "square");
    assert_eq!(task.await.unwrap(), 49);
}

#[tokio::test]
async fn test_task_propagates_error() {
    let task: CryptoTask<()> =
        CryptoTask::spawn("failing", || Err(Error::cipher_operation_failed()));
    assert!(task.await.unwrap_err().is(ErrorKind::CipherOperationFailed));
}

#[tokio::test]
async fn test_panicking_worker_yields_internal_error() {
    let task: CryptoTask<()> = CryptoTask::spawn("panicking", || panic!("engine exploded"));
    let err = task.await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(err.to_string().contains("panicking"));
}

#[tokio::test]
async fn test_independent_tasks_run_concurrently() {
    let a = CryptoTask::spawn("a", || Ok(1));
    let b = CryptoTask::spawn("b", || Ok(2));
    let (a, b) = tokio::join!(a, b);
    assert_eq!(a.unwrap() + b.unwrap(), 3);
}

#[test]
fn test_spawn_outside_runtime_runs_inline() {
    let task = CryptoTask::spawn("inline", || Ok("done"));
    let result = block_on(task);
    assert_eq!(result.unwrap(), "done");
}

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(fut)
}
