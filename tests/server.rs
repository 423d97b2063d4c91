use grubdash::Server;
use grubdash::orders::{self, MemoryStore, OrderResource, SequentialIds};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

async fn exchange(addr: std::net::SocketAddr, raw: String) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn serves_orders_over_tcp_and_shuts_down() {
    let resource = OrderResource::new(MemoryStore::new(), SequentialIds::default());
    let server = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = server.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();

    let handle = tokio::spawn(server.serve_with_shutdown(orders::router(resource), async {
        let _ = stopped.await;
    }));

    let body = r#"{"data":{"deliverTo":"123 Main","mobileNumber":"555-1212","status":"pending","dishes":[{"quantity":2}]}}"#;
    let created = exchange(
        addr,
        format!(
            "POST /orders HTTP/1.1\r\nhost: localhost\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len(),
        ),
    )
    .await;
    assert!(created.starts_with("HTTP/1.1 201"), "{created}");
    assert!(created.contains(r#""id":"1""#), "{created}");

    let listed = exchange(
        addr,
        "GET /orders HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n".to_owned(),
    )
    .await;
    assert!(listed.starts_with("HTTP/1.1 200"), "{listed}");
    assert!(listed.contains("555-1212"), "{listed}");

    let unknown = exchange(
        addr,
        "TRACE /orders HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n".to_owned(),
    )
    .await;
    assert!(unknown.starts_with("HTTP/1.1 405"), "{unknown}");

    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
