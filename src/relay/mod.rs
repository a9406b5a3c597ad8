/*
 *  The peer relay: pairs incoming connections two at a time and forwards
 *  bytes verbatim between them. Stateless per spec.md §4.H - the relay
 *  never parses a message, it just repeats what one peer sent to the other.
 */

mod options;

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

pub use options::RelayOptions;

use crate::engine::Colour;
use crate::utils::prelude::*;

pub struct Relay {
    listener: TcpListener,
}

impl Relay {
    pub fn new(options: &RelayOptions) -> Result<Relay> {
        let listener = TcpListener::bind(("0.0.0.0", options.port))
            .with_context(|| format!("failed to bind relay port {}", options.port))?;
        Ok(Relay { listener })
    }

    /// Accepts connections two at a time, announces colours, and spawns a
    /// forwarding pair for each match. Never returns except on a listener
    /// I/O error.
    pub fn run(&self) -> Result<()> {
        loop {
            let (first, first_addr) = self.listener.accept()?;
            log::info!("peer connected from {first_addr}");

            let (second, second_addr) = self.listener.accept()?;
            log::info!("peer connected from {second_addr}, pairing with {first_addr}");

            if let Err(err) = announce_colours(&first, &second) {
                log::warn!("failed to announce colours to a fresh pair: {err}");
                continue;
            }

            spawn_pair(first, second);
        }
    }
}

fn announce_colours(first: &TcpStream, second: &TcpStream) -> Result<()> {
    writeln!(&*first, "{}", Colour::Black.notate())?;
    writeln!(&*second, "{}", Colour::White.notate())?;
    Ok(())
}

/// Spawns the two forwarding threads for one matched pair, each copying
/// bytes from one peer's socket straight onto the other's until either
/// side disconnects.
fn spawn_pair(first: TcpStream, second: TcpStream) {
    let first_to_second = first.try_clone().and_then(|r| second.try_clone().map(|w| (r, w)));
    let second_to_first = second.try_clone().and_then(|r| first.try_clone().map(|w| (r, w)));

    match (first_to_second, second_to_first) {
        (Ok((r1, w1)), Ok((r2, w2))) => {
            thread::spawn(move || forward(r1, w1));
            thread::spawn(move || forward(r2, w2));
        }
        (Err(err), _) | (_, Err(err)) => {
            log::warn!("failed to clone a peer socket, dropping pair: {err}");
        }
    }
}

/// Copies bytes from `from` to `to` until EOF or a write failure, then
/// stops silently - on disconnect, the relay forwards nothing further to
/// or from that pair, per spec.md §4.H.
fn forward(mut from: TcpStream, mut to: TcpStream) {
    let mut buf = [0u8; 4096];
    loop {
        let read = match from.read(&mut buf) {
            Ok(0) => {
                log::info!("peer disconnected");
                return;
            }
            Ok(n) => n,
            Err(err) => {
                log::warn!("peer read failed: {err}");
                return;
            }
        };

        if let Err(err) = to.write_all(&buf[..read]) {
            log::warn!("peer write failed: {err}");
            return;
        }
    }
}
