use crossbeam_channel::{bounded, unbounded};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

use textbatch::batch::{BatchEngine, ChannelSink, JobStart, NullSink, ShutdownStatus, WorkerPool};
use textbatch::error::{AnalysisError, EngineError};
use textbatch::models::{BatchEvent, BatchSummary, Sentiment};

const WORDS: [&str; 8] = ["good", "river", "bad", "stone", "happy", "problem", "light", "tree"];

/// 生成内容各不相同的文件，并在中间插入两个不存在的路径
fn corpus(dir: &TempDir, count: usize) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for i in 0..count {
        let path = dir.path().join(format!("doc{:02}.txt", i));
        let body: Vec<&str> = (0..(i * 3 + 1)).map(|k| WORDS[(k * 7 + i) % WORDS.len()]).collect();
        fs::write(&path, body.join(" ")).unwrap();
        files.push(path);
    }
    files.insert(count / 3, dir.path().join("ghost-1.txt"));
    files.insert(2 * count / 3, dir.path().join("ghost-2.txt"));
    files
}

#[test]
fn results_are_identical_across_worker_counts() {
    let dir = TempDir::new().unwrap();
    let files = corpus(&dir, 30);

    let single = BatchEngine::new(1).run_batch(&files, &mut NullSink).unwrap();
    let many = BatchEngine::new(8).run_batch(&files, &mut NullSink).unwrap();

    assert_eq!(single.len(), files.len());
    assert_eq!(single, many);
}

#[test]
fn missing_files_fail_in_isolation() {
    let dir = TempDir::new().unwrap();
    let files = corpus(&dir, 12);
    let results = BatchEngine::new(4).run_batch(&files, &mut NullSink).unwrap();

    for (result, path) in results.iter().zip(&files) {
        let expected_missing = !path.exists();
        assert_eq!(result.is_success(), !expected_missing);
        if expected_missing {
            assert_eq!(result.error(), Some(&AnalysisError::NotFound));
            assert_eq!(result.sentiment(), Sentiment::NotApplicable);
        } else {
            assert!(result.total_words() > 0);
        }
    }

    let summary = BatchSummary::from_results(&results);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.succeeded, 12);
}

#[test]
fn background_batch_streams_events_to_pull_consumer() {
    let dir = TempDir::new().unwrap();
    let files = corpus(&dir, 10);
    let total = files.len();
    let engine = Arc::new(BatchEngine::new(3));

    let (tx, rx) = unbounded();
    let worker = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            let mut sink = ChannelSink::new(tx);
            engine.run_batch(&files, &mut sink)
        })
    };

    // 发送端随引擎线程结束而关闭
    let events: Vec<BatchEvent> = rx.iter().collect();
    let returned = worker.join().unwrap().unwrap();

    let last = events.last().unwrap();
    assert_eq!(last, &BatchEvent::BatchCompleted { results: returned.clone() });
    assert_eq!(last.summary().unwrap().total_files, total);
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), total);

    assert_eq!(engine.shutdown(), ShutdownStatus::Drained);
}

#[test]
fn batch_after_shutdown_is_rejected() {
    let dir = TempDir::new().unwrap();
    let files = corpus(&dir, 3);
    let engine = BatchEngine::new(2);

    engine.run_batch(&files, &mut NullSink).unwrap();
    assert_eq!(engine.shutdown(), ShutdownStatus::Drained);
    assert_eq!(engine.shutdown(), ShutdownStatus::AlreadyShutDown);
    assert_eq!(
        engine.run_batch(&files, &mut NullSink),
        Err(EngineError::ShutDown)
    );

    // 空批次不涉及线程池
    assert_eq!(engine.run_batch(&[], &mut NullSink), Ok(vec![]));
}

#[test]
fn submission_during_shutdown_is_rejected() {
    let pool = Arc::new(WorkerPool::new(1));
    let (release_tx, release_rx) = bounded::<()>(0);
    let (started_tx, started_rx) = bounded::<()>(1);

    pool.submit_all(vec![move |_: JobStart| {
        started_tx.send(()).unwrap();
        release_rx.recv().unwrap();
    }])
    .unwrap();
    started_rx.recv().unwrap();

    let closer = {
        let pool = Arc::clone(&pool);
        thread::spawn(move || pool.shutdown(Duration::from_secs(30)))
    };

    while !pool.is_shutdown() {
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(
        pool.submit_all(vec![|_: JobStart| {}]),
        Err(EngineError::ShuttingDown)
    );

    release_tx.send(()).unwrap();
    assert_eq!(closer.join().unwrap(), ShutdownStatus::Drained);
    assert_eq!(pool.in_flight(), 0);
}
