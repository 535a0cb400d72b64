use std::sync::Arc;

use nfc_battleship::transport::in_memory::InMemoryTransport;
use nfc_battleship::transport::tcp::TcpTransport;
use nfc_battleship::transport::Transport;
use nfc_battleship::{
    Coordinate, FileStore, GameConfig, GameError, MemoryStore, Reply, Request, Route, ScanClient, ScanServer,
    SessionHub, PROTOCOL_VERSION,
};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

fn hub(seed: u64) -> Arc<SessionHub<MemoryStore>> {
    Arc::new(SessionHub::new(GameConfig::default(), Some(seed), |_| MemoryStore::new()))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_scans_lose_no_shots() {
    let hub = hub(1);
    hub.new_game("table").await.unwrap();

    let mut tasks = Vec::new();
    for row in 0..4u8 {
        for col in 0..4u8 {
            let hub = Arc::clone(&hub);
            tasks.push(tokio::spawn(async move {
                hub.shoot("table", Coordinate::new(row, col)).await
            }));
        }
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let state = hub.state("table").await.unwrap().unwrap();
    assert_eq!(state.shots().len(), 16);
    assert!(state.is_victory());
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let hub = hub(2);
    hub.new_game("a").await.unwrap();
    assert_eq!(hub.scan("b", "11").await, Route::Start);
    assert_eq!(
        hub.shoot("b", Coordinate::new(0, 0)).await,
        Err(GameError::UninitializedGame)
    );
    assert_ne!(hub.scan("a", "11").await, Route::Start);
    assert!(hub.summary("b").await.unwrap().is_none());
    assert_eq!(hub.summary("a").await.unwrap().unwrap().shots_fired, 1);
    assert_eq!(hub.len().await, 1);

    hub.clear("a").await.unwrap();
    assert!(hub.state("a").await.unwrap().is_none());
    assert_eq!(hub.len().await, 0);
}

#[tokio::test]
async fn test_unknown_keys_are_not_held() {
    let server = ScanServer::new(hub(6));
    for i in 0..1000 {
        let reply = server
            .handle(Request::Status {
                session: format!("s{}", i),
            })
            .await;
        assert_eq!(reply, Reply::NoGame);
    }
    assert_eq!(server.hub().scan("nobody", "11").await, Route::Start);
    assert_eq!(server.hub().len().await, 0);

    server.hub().new_game("x").await.unwrap();
    assert_eq!(server.hub().len().await, 1);
    assert_eq!(
        server
            .handle(Request::Clear {
                session: "x".to_string()
            })
            .await,
        Reply::Cleared
    );
    assert_eq!(server.hub().len().await, 0);
    assert_eq!(server.hub().scan("x", "11").await, Route::Start);
}

#[tokio::test]
async fn test_stored_game_is_resumed() {
    let dir = std::env::temp_dir().join(format!("nfc-battleship-hub-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let make_hub = |dir: std::path::PathBuf| {
        SessionHub::new(GameConfig::default(), Some(7), move |key| FileStore::with_key(&dir, key))
    };

    let first = make_hub(dir.clone());
    first.new_game("table").await.unwrap();
    first.shoot("table", Coordinate::new(0, 0)).await.unwrap();
    drop(first);

    let second = make_hub(dir.clone());
    assert_eq!(second.len().await, 0);
    assert_eq!(second.summary("table").await.unwrap().map(|s| s.shots_fired), Some(1));
    assert_eq!(second.len().await, 0);
    assert_ne!(second.scan("table", "22").await, Route::Start);
    assert_eq!(second.len().await, 1);
    assert_eq!(second.summary("table").await.unwrap().map(|s| s.shots_fired), Some(2));

    second.clear("table").await.unwrap();
    assert_eq!(second.len().await, 0);
    assert!(second.state("table").await.unwrap().is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_server_rejects_bad_requests() {
    let server = ScanServer::new(hub(3));
    assert!(matches!(
        server
            .handle(Request::Scan {
                session: "../etc".to_string(),
                hid: "11".to_string()
            })
            .await,
        Reply::Error(_)
    ));
    assert!(matches!(
        server.handle(Request::Hello { version: PROTOCOL_VERSION + 1 }).await,
        Reply::Error(_)
    ));
    assert_eq!(
        server
            .handle(Request::Status {
                session: "nobody".to_string()
            })
            .await,
        Reply::NoGame
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_client_server_in_memory() -> anyhow::Result<()> {
    let (client_end, server_end) = InMemoryTransport::<Request, Reply>::pair();
    let server = ScanServer::new(hub(4));
    let handle = tokio::spawn(async move { server.serve_connection(server_end).await });

    let mut client = ScanClient::new(client_end, "booth-1");
    assert_eq!(client.scan("11").await?, Route::Start);
    assert_eq!(client.new_game().await?, 2);

    let mut routes = Vec::new();
    for row in 1..=4 {
        for col in 1..=4 {
            routes.push(client.scan(&format!("{}{}", row, col)).await?);
        }
    }
    // the last ship cell wins the game; later novel cells keep reporting it
    let first_victory = routes
        .iter()
        .position(|r| *r == Route::Victory)
        .expect("fleet sunk");
    assert_eq!(routes[..first_victory].iter().filter(|r| **r == Route::Hit).count(), 4);
    assert!(routes[first_victory..].iter().all(|r| *r == Route::Victory));

    let summary = client.status().await?.expect("game in progress");
    assert!(summary.victory);
    assert_eq!(summary.shots_fired, 16);

    client.clear().await?;
    assert!(client.status().await?.is_none());

    drop(client);
    handle.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_client_server_tcp() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = ScanServer::new(hub(5));
    tokio::spawn(async move { server.listen(listener).await });

    let transport: TcpTransport<Request, Reply> = TcpTransport::connect(addr).await?;
    let mut client = ScanClient::new(transport, "tcp-session");
    assert_eq!(client.new_game().await?, 2);
    let route = client.scan("22").await?;
    assert!(matches!(route, Route::Hit | Route::Miss));
    assert_eq!(client.scan("99").await?, Route::Start);
    assert_eq!(client.status().await?.map(|s| s.shots_fired), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_client_rejects_other_protocol_version() {
    let (client_end, mut server_end) = InMemoryTransport::<Request, Reply>::pair();
    let fake_server = tokio::spawn(async move {
        let hello = server_end.recv().await.unwrap();
        assert_eq!(hello, Request::Hello { version: PROTOCOL_VERSION });
        server_end
            .send(Reply::Hello {
                version: PROTOCOL_VERSION + 1,
            })
            .await
            .unwrap();
        server_end
    });

    let mut client = ScanClient::new(client_end, "booth-2");
    let err = client.status().await.unwrap_err();
    assert!(err.to_string().contains("version mismatch"));
    drop(fake_server.await.unwrap());
}

#[tokio::test]
async fn test_connection_end_is_told_apart_from_broken_frames() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = ScanServer::new(hub(8));
    let handle = tokio::spawn(async move {
        let mut results = Vec::new();
        for _ in 0..2 {
            let (stream, _) = listener.accept().await?;
            let transport: TcpTransport<Reply, Request> = TcpTransport::new(stream);
            results.push(server.serve_connection(transport).await.is_ok());
        }
        anyhow::Ok(results)
    });

    let hang_up = TcpStream::connect(addr).await?;
    drop(hang_up);

    let mut zero_length = TcpStream::connect(addr).await?;
    zero_length.write_all(&[0, 0, 0, 0]).await?;

    assert_eq!(handle.await??, vec![true, false]);
    Ok(())
}

#[tokio::test]
async fn test_in_memory_hang_up_ends_cleanly() {
    let (client_end, server_end) = InMemoryTransport::<Request, Reply>::pair();
    let server = ScanServer::new(hub(9));
    drop(client_end);
    assert!(server.serve_connection(server_end).await.is_ok());
}
