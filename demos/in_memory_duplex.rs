//! Two duplex peers talking over in-memory channels
//!
//! Each peer serves `add` and calls the other. Packets travel through
//! `tokio::sync::mpsc` queues in place of a socket.
//!
//! Run with `RUST_LOG=debug cargo run --example in_memory_duplex` to watch
//! every packet.

use rpcwire::core::BoxError;
use rpcwire::server::{from_fn, from_typed_fn, Router};
use rpcwire::Duplex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Serialize, Deserialize)]
struct AddParams {
    a: i32,
    b: i32,
}

/// Peer name used as the context of every packet it sends
type PeerName = &'static str;

fn router(name: PeerName) -> Router<PeerName> {
    let mut router = Router::new();
    router.register(
        "add",
        from_typed_fn(move |p: AddParams, from: PeerName| async move {
            tracing::info!(peer = name, from = from, "Adding {} + {}", p.a, p.b);
            Ok(p.a + p.b)
        }),
    );
    router.register(
        "name",
        from_fn(move |_, _| async move { Ok(serde_json::json!(name)) }),
    );
    router
}

/// Create a peer whose outbound packets land on `outbound`
fn peer(
    name: PeerName,
    outbound: mpsc::UnboundedSender<(String, PeerName)>,
) -> Duplex<PeerName> {
    Duplex::new(router(name), move |packet: String, _to: PeerName| {
        let outbound = outbound.clone();
        async move {
            outbound
                .send((packet, name))
                .map_err(|e| Box::new(e) as BoxError)
        }
    })
}

/// Feed every packet arriving on `inbound` to `peer`
fn pump(peer: Duplex<PeerName>, mut inbound: mpsc::UnboundedReceiver<(String, PeerName)>) {
    tokio::spawn(async move {
        while let Some((packet, from)) = inbound.recv().await {
            let peer = peer.clone();
            tokio::spawn(async move {
                if let Err(e) = peer.ingest_packet(&packet, from).await {
                    tracing::error!(error = %e, "Failed to ingest packet");
                }
            });
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (to_bob, bob_inbound) = mpsc::unbounded_channel();
    let (to_alice, alice_inbound) = mpsc::unbounded_channel();

    let alice = peer("alice", to_bob);
    let bob = peer("bob", to_alice);

    pump(alice.clone(), alice_inbound);
    pump(bob.clone(), bob_inbound);

    let sum: i32 = alice.request("add", AddParams { a: 2, b: 3 }, "bob").await?;
    println!("alice asked bob: 2 + 3 = {}", sum);

    let (alice_name, bob_name) = tokio::join!(
        bob.call("name", None, "alice"),
        alice.call("name", None, "bob"),
    );
    println!("bob reached {}, alice reached {}", alice_name?, bob_name?);

    match alice.call("subtract", None, "bob").await {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("bob does not subtract: {}", e),
    }

    Ok(())
}
