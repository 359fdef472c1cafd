// tests/post_selector.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use sportswire_bot::feeds::{FeedItem, FeedSource};
use sportswire_bot::ledger::TitleLedger;
use sportswire_bot::platform::{FoundPost, Platform};
use sportswire_bot::selector::{run_post_pass, PostOutcome};

enum Behavior {
    Item(&'static str, &'static str),
    Empty,
    Fail,
}

struct MockFeed {
    name: &'static str,
    behavior: Behavior,
}

#[async_trait]
impl FeedSource for MockFeed {
    async fn newest(&self) -> Result<Option<FeedItem>> {
        match &self.behavior {
            Behavior::Item(title, link) => Ok(Some(FeedItem {
                title: title.to_string(),
                link: link.to_string(),
            })),
            Behavior::Empty => Ok(None),
            Behavior::Fail => Err(anyhow!("connection refused")),
        }
    }
    fn name(&self) -> &str {
        self.name
    }
}

#[derive(Default)]
struct MockPlatform {
    posts: Mutex<Vec<String>>,
    fail_first_posts: AtomicUsize,
}

#[async_trait]
impl Platform for MockPlatform {
    async fn post_status(&self, text: &str) -> Result<()> {
        if self
            .fail_first_posts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(anyhow!("platform rejected the post"));
        }
        self.posts.lock().unwrap().push(text.to_string());
        Ok(())
    }
    async fn search(&self, _q: &str, _lang: &str, _limit: u32) -> Result<Vec<FoundPost>> {
        Ok(vec![])
    }
    async fn reply(&self, _id: &str, _text: &str) -> Result<()> {
        Ok(())
    }
    async fn favorite(&self, _id: &str) -> Result<()> {
        Ok(())
    }
    async fn reshare(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

fn feeds(list: Vec<MockFeed>) -> Vec<Box<dyn FeedSource>> {
    list.into_iter()
        .map(|f| Box::new(f) as Box<dyn FeedSource>)
        .collect()
}

#[tokio::test]
async fn at_most_one_post_even_with_many_unseen_items() {
    let tmp = tempfile::tempdir().unwrap();
    let mut ledger = TitleLedger::load(tmp.path().join("posted.txt")).unwrap();
    let platform = MockPlatform::default();
    let sources = feeds(vec![
        MockFeed { name: "a", behavior: Behavior::Item("Headline A", "https://t/a") },
        MockFeed { name: "b", behavior: Behavior::Item("Headline B", "https://t/b") },
        MockFeed { name: "c", behavior: Behavior::Item("Headline C", "https://t/c") },
    ]);

    let outcome = run_post_pass(&sources, &mut ledger, &platform).await.unwrap();

    assert_eq!(
        outcome,
        PostOutcome::Posted { source: "a".into(), title: "Headline A".into() }
    );
    let posts = platform.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0], "🏆 Headline A\nhttps://t/a");
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn priority_order_skips_seen_and_never_reaches_later_sources() {
    let tmp = tempfile::tempdir().unwrap();
    let mut ledger = TitleLedger::load(tmp.path().join("posted.txt")).unwrap();
    ledger.record("Headline A").unwrap();
    let platform = MockPlatform::default();
    let sources = feeds(vec![
        MockFeed { name: "a", behavior: Behavior::Item("Headline A", "https://t/a") },
        MockFeed { name: "b", behavior: Behavior::Item("Headline B", "https://t/b") },
        MockFeed { name: "c", behavior: Behavior::Item("Headline C", "https://t/c") },
    ]);

    let outcome = run_post_pass(&sources, &mut ledger, &platform).await.unwrap();

    assert_eq!(
        outcome,
        PostOutcome::Posted { source: "b".into(), title: "Headline B".into() }
    );
    assert!(!ledger.contains("Headline C"));
}

#[tokio::test]
async fn dead_feed_does_not_block_the_others() {
    let tmp = tempfile::tempdir().unwrap();
    let mut ledger = TitleLedger::load(tmp.path().join("posted.txt")).unwrap();
    let platform = MockPlatform::default();
    let sources = feeds(vec![
        MockFeed { name: "a", behavior: Behavior::Fail },
        MockFeed { name: "b", behavior: Behavior::Empty },
        MockFeed { name: "c", behavior: Behavior::Item("Headline C", "https://t/c") },
    ]);

    let outcome = run_post_pass(&sources, &mut ledger, &platform).await.unwrap();

    assert_eq!(
        outcome,
        PostOutcome::Posted { source: "c".into(), title: "Headline C".into() }
    );
}

#[tokio::test]
async fn failed_post_attempt_continues_to_next_source() {
    let tmp = tempfile::tempdir().unwrap();
    let mut ledger = TitleLedger::load(tmp.path().join("posted.txt")).unwrap();
    let platform = MockPlatform::default();
    platform.fail_first_posts.store(1, Ordering::SeqCst);
    let sources = feeds(vec![
        MockFeed { name: "a", behavior: Behavior::Item("Headline A", "https://t/a") },
        MockFeed { name: "b", behavior: Behavior::Item("Headline B", "https://t/b") },
    ]);

    let outcome = run_post_pass(&sources, &mut ledger, &platform).await.unwrap();

    // A's post was rejected; the scan moved on and B succeeded.
    assert_eq!(
        outcome,
        PostOutcome::Posted { source: "b".into(), title: "Headline B".into() }
    );
    assert!(!ledger.contains("Headline A"));
    assert!(ledger.contains("Headline B"));
}

#[tokio::test]
async fn nothing_to_post_leaves_ledger_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("posted.txt");
    let mut ledger = TitleLedger::load(&path).unwrap();
    ledger.record("Headline A").unwrap();
    let before = std::fs::read(&path).unwrap();

    let platform = MockPlatform::default();
    let sources = feeds(vec![
        MockFeed { name: "a", behavior: Behavior::Item("Headline A", "https://t/a") },
        MockFeed { name: "b", behavior: Behavior::Empty },
    ]);

    let outcome = run_post_pass(&sources, &mut ledger, &platform).await.unwrap();

    assert_eq!(outcome, PostOutcome::Nothing);
    assert!(platform.posts.lock().unwrap().is_empty());
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn ledger_write_failure_aborts_the_pass() {
    let tmp = tempfile::tempdir().unwrap();
    // Parent directory missing: the append will fail after a successful post.
    let path = tmp.path().join("no-such-dir").join("posted.txt");
    let mut ledger = TitleLedger::load(&path).unwrap();
    let platform = MockPlatform::default();
    let sources = feeds(vec![MockFeed {
        name: "a",
        behavior: Behavior::Item("Headline A", "https://t/a"),
    }]);

    let result = run_post_pass(&sources, &mut ledger, &platform).await;

    assert!(result.is_err());
    // At-least-once is accepted: the post went out even though the record
    // could not be made durable.
    assert_eq!(platform.posts.lock().unwrap().len(), 1);
    assert!(!ledger.contains("Headline A"));
}
