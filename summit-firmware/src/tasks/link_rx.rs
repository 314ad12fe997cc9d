//! ESP-NOW receive task
//!
//! Decodes datagrams and queues them for the unit loop.

use defmt::*;
use esp_wifi::esp_now::EspNowReceiver;

use summit_protocol::{LinkMessage, PeerAddress};

use crate::channels::{Inbound, INBOUND};
use crate::now_ms;

#[embassy_executor::task]
pub async fn link_rx_task(mut receiver: EspNowReceiver<'static>) {
    info!("Link RX task started");

    loop {
        let received = receiver.receive_async().await;
        let received_ms = now_ms();
        let from = PeerAddress::new(received.info.src_address);

        match LinkMessage::decode(received.data()) {
            Ok(message) => {
                if message.kind.is_heartbeat() {
                    trace!("RX {} from {}", message.kind, from);
                } else {
                    debug!("RX {} from {}", message.kind, from);
                }
                if INBOUND
                    .try_send(Inbound {
                        message,
                        received_ms,
                    })
                    .is_err()
                {
                    warn!("Inbound channel full, dropping {}", message.kind);
                }
            }
            Err(e) => {
                warn!("Malformed datagram from {}: {}", from, e);
            }
        }
    }
}
