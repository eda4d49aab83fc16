//! Tests against a running Neo4j instance.
//!
//! Run with `cargo test -p vkgraph-graph -- --ignored`. Connection settings
//! come from NEO4J_URI / NEO4J_USER / NEO4J_PASSWORD. Ids are negative so the
//! fixtures never collide with crawled users.

use neo4rs::Query;
use vkgraph_core::{Crawler, UserRecord};
use vkgraph_graph::{GraphClient, GraphConfig, GraphStore, REPORTS, run_all_reports, run_report, schema};

async fn connect() -> GraphStore {
    let defaults = GraphConfig::default();
    let config = GraphConfig {
        uri: std::env::var("NEO4J_URI").unwrap_or(defaults.uri),
        user: std::env::var("NEO4J_USER").unwrap_or(defaults.user),
        password: std::env::var("NEO4J_PASSWORD").unwrap_or(defaults.password),
    };
    let client = GraphClient::connect(&config).await.expect("Neo4j must be running");
    schema::initialize_schema(&client).await.unwrap();
    GraphStore::new(client)
}

async fn cleanup(store: &GraphStore, ids: &[i64]) {
    for id in ids {
        store
            .client()
            .execute(Query::new("MATCH (u:User {id: $id}) DETACH DELETE u".to_string()).param("id", *id))
            .await
            .unwrap();
    }
}

async fn count(store: &GraphStore, cypher: &str) -> i64 {
    store
        .client()
        .query_scalar::<i64>(Query::new(cypher.to_string()), "c")
        .await
        .unwrap()
        .unwrap_or(0)
}

fn record(id: i64) -> UserRecord {
    UserRecord {
        id,
        name: "Ivan Ivanov".to_string(),
        screen_name: None,
        sex: Some(2),
        home_town: None,
        city: Some("Moscow".to_string()),
    }
}

#[tokio::test]
#[ignore]
async fn test_save_user_twice_keeps_one_node() {
    let store = connect().await;
    cleanup(&store, &[-101]).await;

    store.save_user(&record(-101)).await.unwrap();
    store.save_user(&record(-101)).await.unwrap();

    assert_eq!(count(&store, "MATCH (u:User {id: -101}) RETURN count(u) AS c").await, 1);
    let city: Option<String> = store
        .client()
        .query_scalar(Query::new("MATCH (u:User {id: -101}) RETURN u.city AS city".to_string()), "city")
        .await
        .unwrap();
    assert_eq!(city.as_deref(), Some("Moscow"));

    cleanup(&store, &[-101]).await;
}

#[tokio::test]
#[ignore]
async fn test_duplicate_relationship_yields_one_edge() {
    let store = connect().await;
    cleanup(&store, &[-201, -202]).await;

    store.save_user(&record(-201)).await.unwrap();
    store.save_relationship(-201, -202).await.unwrap();
    store.save_relationship(-201, -202).await.unwrap();

    let edges = count(
        &store,
        "MATCH (:User {id: -202})-[r:FOLLOWS]->(:User {id: -201}) RETURN count(r) AS c",
    )
    .await;
    assert_eq!(edges, 1);

    cleanup(&store, &[-201, -202]).await;
}

#[tokio::test]
#[ignore]
async fn test_relationship_without_followed_node_is_skipped() {
    let store = connect().await;
    cleanup(&store, &[-301, -302]).await;

    store.save_relationship(-301, -302).await.unwrap();
    assert_eq!(count(&store, "MATCH (u:User) WHERE u.id IN [-301, -302] RETURN count(u) AS c").await, 0);
}

#[tokio::test]
#[ignore]
async fn test_reports_decode() {
    let store = connect().await;
    for report in REPORTS {
        run_report(&store, report).await.unwrap();
    }
    run_all_reports(&store).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_store_is_a_crawl_sink() {
    use async_trait::async_trait;
    use vkgraph_core::{FetchResult, UserInfo, UserSource};

    struct Lonely;

    #[async_trait]
    impl UserSource for Lonely {
        async fn fetch_user_info(&self, user_id: i64) -> FetchResult<UserInfo> {
            Ok(UserInfo { id: user_id, first_name: "Lonely".to_string(), ..Default::default() })
        }

        async fn fetch_followers(&self, _user_id: i64) -> FetchResult<Vec<i64>> {
            Ok(vec![-402])
        }
    }

    let store = connect().await;
    cleanup(&store, &[-401, -402]).await;

    let stats = Crawler::new(&Lonely, &store).crawl(-401).await.unwrap();
    assert_eq!(stats.users_saved, 2);
    assert_eq!(
        count(&store, "MATCH (:User {id: -402})-[r:FOLLOWS]->(:User {id: -401}) RETURN count(r) AS c").await,
        1
    );

    cleanup(&store, &[-401, -402]).await;
}
