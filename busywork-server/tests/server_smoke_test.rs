use busywork_config::BusyworkConfig;
use busywork_interfaces::{Framework, StatisticsStore};
use busywork_server::{Server, ServiceContainer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

fn memory_config() -> BusyworkConfig {
    let mut config = BusyworkConfig::default();
    config.database.url = "memory://".to_string();
    config.server.variants = vec![Framework::Quarkus, Framework::SpringBoot];
    config
}

async fn get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_serves_configured_variants_until_shutdown() {
    let config = memory_config();
    let services = ServiceContainer::new(&config).await.unwrap();
    let server = Server::with_services(config, services);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(server.serve(listener, async {
        let _ = shutdown_rx.await;
    }));

    let hello = get(addr, "/quarkus").await;
    assert!(hello.starts_with("HTTP/1.1 200"));
    assert!(hello.ends_with("Quarkus: hello"));

    let hello = get(addr, "/springboot").await;
    assert!(hello.ends_with("Spring Boot: hello"));

    let missing = get(addr, "/micronaut").await;
    assert!(missing.starts_with("HTTP/1.1 404"));

    let health = get(addr, "/health").await;
    assert!(health.starts_with("HTTP/1.1 200"));

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_cpu_request_is_persisted_through_the_container_store() {
    let config = memory_config();
    let services = ServiceContainer::new(&config).await.unwrap();
    let store = services.store.clone();
    let server = Server::with_services(config, services);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve(listener, async {
        let _ = shutdown_rx.await;
    }));

    let response = get(addr, "/quarkus/cpu?iterations=1&db=true").await;
    assert!(response.starts_with("HTTP/1.1 200"));

    let records = store.find_all(Framework::Quarkus).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].parameter, "1");

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
