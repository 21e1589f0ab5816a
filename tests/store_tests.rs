use std::sync::Arc;
use std::thread;
use traefik_aggregator::document::{AggregatedDocument, BackendGroup, OutputRoute};
use traefik_aggregator::ConfigStore;

// 构造一份包含 n 条路由及对应服务的文档
fn document_with(n: usize) -> AggregatedDocument {
    let mut document = AggregatedDocument::default();
    for i in 0..n {
        let router = format!("ds-route-{}", i);
        let service = format!("service-{}", router);
        document.http.routers.insert(
            router,
            OutputRoute {
                rule: format!("Host(`r{}.example.com`)", i),
                service: service.clone(),
                entry_points: vec!["websecure".to_string()],
                ..Default::default()
            },
        );
        document.http.services.insert(
            service,
            BackendGroup::single(format!("http://10.0.0.{}:80", i % 250), None),
        );
    }
    document
}

#[test]
fn test_initial_document_is_empty() {
    let store = ConfigStore::new();
    assert!(store.current().is_empty());
    assert_eq!(store.generation(), 0);
    assert_eq!(
        serde_json::to_string(store.current().as_ref()).unwrap(),
        r#"{"http":{"routers":{},"services":{}}}"#
    );
}

#[test]
fn test_publish_replaces_document() {
    let store = ConfigStore::new();

    store.publish(document_with(3));
    let first = store.current();
    assert_eq!(first.routers().len(), 3);
    assert_eq!(store.generation(), 1);

    store.publish(document_with(1));
    assert_eq!(store.current().routers().len(), 1);
    assert_eq!(store.generation(), 2);

    // 已取出的快照不受后续发布影响
    assert_eq!(first.routers().len(), 3);
}

#[test]
fn test_readers_always_see_complete_document() {
    let store = Arc::new(ConfigStore::new());
    store.publish(document_with(10));

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..200 {
                let n = if i % 2 == 0 { 50 } else { 10 };
                store.publish(document_with(n));
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    let document = store.current();
                    let routers = document.routers().len();
                    // 只可能看到某一次完整发布的结果
                    assert!(routers == 10 || routers == 50, "partial document: {}", routers);
                    assert_eq!(routers, document.services().len());
                    for route in document.routers().values() {
                        assert!(document.services().contains_key(&route.service));
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(store.generation(), 201);
}
