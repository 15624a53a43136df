use recall_corpus::{Corpus, Document};
use recall_search::{QueryService, SearchError};
use recall_store::Store;
use tempfile::TempDir;

fn wellness_corpus() -> Corpus {
    Corpus::from_records(vec![
        Document::new("w1", "slow breathing settles the nervous system")
            .with_meta("type", "breathing"),
        Document::new("w2", "an evening walk clears the mind").with_meta("type", "movement"),
        Document::new("w3", "write down three good things before sleep")
            .with_meta("type", "journaling"),
        Document::new("w4", "slow stretching before sleep helps the body rest")
            .with_meta("type", "movement"),
    ])
    .expect("valid corpus")
}

async fn built_service(temp: &TempDir) -> QueryService {
    let store = Store::build(wellness_corpus());
    store.save(temp.path(), "wellness").await.expect("save");
    QueryService::open(temp.path(), ["wellness"])
        .await
        .expect("open")
}

#[tokio::test]
async fn build_save_open_search_round_trip() {
    let temp = TempDir::new().expect("tempdir");
    let service = built_service(&temp).await;

    let hits = service
        .search("wellness", Some("breathing to calm the nervous system"), 2)
        .expect("search");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "w1");
    assert!(hits[0].score > hits[1].score);
}

#[tokio::test]
async fn loaded_store_satisfies_shape_invariants() {
    let temp = TempDir::new().expect("tempdir");
    let store = Store::build(wellness_corpus());
    store.save(temp.path(), "wellness").await.expect("save");

    let loaded = Store::load(temp.path(), "wellness").await.expect("load");
    assert_eq!(loaded.embeddings().nrows(), loaded.corpus().len());
    assert_eq!(
        loaded.embeddings().ncols(),
        loaded.vectorizer().vocab_size()
    );
}

#[tokio::test]
async fn each_document_text_retrieves_itself_first() {
    let temp = TempDir::new().expect("tempdir");
    let service = built_service(&temp).await;

    let corpus = wellness_corpus();
    for doc in corpus.iter() {
        let hits = service
            .search("wellness", Some(&doc.text), 1)
            .expect("search");
        assert_eq!(hits[0].id, doc.id, "text of {} should rank itself first", doc.id);
        assert!(
            (hits[0].score - 1.0).abs() < 1e-5,
            "self-similarity of {} should be 1.0, got {}",
            doc.id,
            hits[0].score
        );
    }
}

#[tokio::test]
async fn superset_document_outranks_subset_on_full_query() {
    // Mirrors the contract example: a document containing every query term
    // beats one containing a strict subset of them.
    let temp = TempDir::new().expect("tempdir");
    let corpus = Corpus::from_records(vec![
        Document::new("q1", "morning walk helps"),
        Document::new("q2", "morning walk"),
    ])
    .expect("valid corpus");
    let store = Store::build(corpus);
    store.save(temp.path(), "quotes").await.expect("save");

    let service = QueryService::open(temp.path(), ["quotes"])
        .await
        .expect("open");
    let hits = service
        .search("quotes", Some("morning walk helps"), 2)
        .expect("search");
    assert_eq!(hits[0].id, "q1");
    assert!((hits[0].score - 1.0).abs() < 1e-5);
    assert_eq!(hits[1].id, "q2");
    assert!(hits[1].score < hits[0].score);
}

#[tokio::test]
async fn two_builds_from_one_corpus_are_byte_identical() {
    let first_dir = TempDir::new().expect("tempdir");
    let second_dir = TempDir::new().expect("tempdir");
    Store::build(wellness_corpus())
        .save(first_dir.path(), "wellness")
        .await
        .expect("save");
    Store::build(wellness_corpus())
        .save(second_dir.path(), "wellness")
        .await
        .expect("save");

    for artifact in [
        "wellness_documents.json",
        "wellness_embeddings.bin",
        "wellness_vectorizer.bin",
    ] {
        let first = tokio::fs::read(first_dir.path().join(artifact))
            .await
            .expect("read first");
        let second = tokio::fs::read(second_dir.path().join(artifact))
            .await
            .expect("read second");
        assert_eq!(first, second, "{artifact} differs between builds");
    }
}

#[tokio::test]
async fn open_fails_fast_when_a_namespace_is_missing() {
    let temp = TempDir::new().expect("tempdir");
    let store = Store::build(wellness_corpus());
    store.save(temp.path(), "wellness").await.expect("save");

    let err = QueryService::open(temp.path(), ["wellness", "quotes"])
        .await
        .expect_err("must fail");
    assert!(matches!(err, SearchError::Store(_)));
}

#[tokio::test]
async fn concurrent_searches_share_one_service() {
    let temp = TempDir::new().expect("tempdir");
    let service = std::sync::Arc::new(built_service(&temp).await);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = std::sync::Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .search("wellness", Some("breathing"), 3)
                .expect("search")
        }));
    }

    let mut outputs = Vec::new();
    for handle in handles {
        outputs.push(handle.await.expect("join"));
    }
    for hits in &outputs[1..] {
        assert_eq!(hits, &outputs[0]);
    }
}
