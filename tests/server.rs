use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tinykv::{RespValue, Server, Store};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn start_server() -> (SocketAddr, Arc<Store>) {
    let server = Server::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    let store = server.store();
    tokio::spawn(server.run());
    (addr, store)
}

/// Sends one command and reads until `expected_len` reply bytes arrived.
async fn request(client: &mut TcpStream, words: &[&str], expected_len: usize) -> Vec<u8> {
    client
        .write_all(&RespValue::command(words).serialize())
        .await
        .unwrap();

    let mut reply = vec![0u8; expected_len];
    tokio::time::timeout(Duration::from_secs(2), client.read_exact(&mut reply))
        .await
        .expect("timed out waiting for reply")
        .unwrap();
    reply
}

#[tokio::test]
async fn ping() {
    let (addr, _) = start_server().await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    client.write_all(b"*1\r\n$4\r\nPING\r\n").await.unwrap();
    let mut buf = [0u8; 7];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"+PONG\r\n");
}

#[tokio::test]
async fn echo() {
    let (addr, _) = start_server().await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    client
        .write_all(b"*2\r\n$4\r\nECHO\r\n$5\r\nhello\r\n")
        .await
        .unwrap();
    let mut buf = [0u8; 11];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"$5\r\nhello\r\n");
}

#[tokio::test]
async fn store_is_shared_across_connections() {
    let (addr, store) = start_server().await;
    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();

    assert_eq!(request(&mut a, &["SET", "foo", "bar"], 5).await, b"+OK\r\n");
    assert_eq!(request(&mut b, &["GET", "foo"], 9).await, b"$3\r\nbar\r\n");
    assert_eq!(store.get("foo"), Some("bar".to_string()));
}

#[tokio::test]
async fn separate_servers_do_not_share_state() {
    let (first, _) = start_server().await;
    let (second, _) = start_server().await;
    let mut a = TcpStream::connect(first).await.unwrap();
    let mut b = TcpStream::connect(second).await.unwrap();

    assert_eq!(request(&mut a, &["SET", "foo", "bar"], 5).await, b"+OK\r\n");
    assert_eq!(request(&mut b, &["GET", "foo"], 5).await, b"$-1\r\n");
}

#[tokio::test]
async fn key_expires_after_px() {
    let (addr, store) = start_server().await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    assert_eq!(
        request(&mut client, &["SET", "foo", "bar", "PX", "100"], 5).await,
        b"+OK\r\n"
    );
    assert_eq!(request(&mut client, &["GET", "foo"], 9).await, b"$3\r\nbar\r\n");

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(request(&mut client, &["GET", "foo"], 5).await, b"$-1\r\n");
    assert!(store.entry("foo").is_none());
}

#[tokio::test]
async fn get_missing_key() {
    let (addr, _) = start_server().await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    assert_eq!(request(&mut client, &["GET", "missing"], 5).await, b"$-1\r\n");
}

#[tokio::test]
async fn unknown_command() {
    let (addr, _) = start_server().await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    let reply = request(&mut client, &["FOO"], 22).await;
    assert_eq!(reply, b"-ERR unknown command\r\n");
}

#[tokio::test]
async fn garbage_is_ignored_and_connection_survives() {
    let (addr, _) = start_server().await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    client.write_all(b"+OK\r\n*0\r\n").await.unwrap();
    assert_eq!(request(&mut client, &["PING"], 7).await, b"+PONG\r\n");
}

#[tokio::test]
async fn disconnecting_client_does_not_affect_others() {
    let (addr, _) = start_server().await;
    let mut stays = TcpStream::connect(addr).await.unwrap();

    {
        let mut leaves = TcpStream::connect(addr).await.unwrap();
        leaves.write_all(b"*2\r\n$3\r\nGET").await.unwrap();
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(request(&mut stays, &["PING"], 7).await, b"+PONG\r\n");
}

#[tokio::test]
async fn large_value_round_trip() {
    let (addr, store) = start_server().await;
    let mut client = TcpStream::connect(addr).await.unwrap();
    let value = "x".repeat(70 * 1024);

    assert_eq!(request(&mut client, &["SET", "k", &value], 5).await, b"+OK\r\n");

    let expected = RespValue::bulk_string(value.clone()).serialize();
    assert_eq!(request(&mut client, &["GET", "k"], expected.len()).await, expected);
    assert_eq!(store.get("k"), Some(value));
}

#[tokio::test]
async fn unterminated_junk_does_not_swallow_next_command() {
    let (addr, _) = start_server().await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    client.write_all(b"hello").await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(request(&mut client, &["PING"], 7).await, b"+PONG\r\n");
}
