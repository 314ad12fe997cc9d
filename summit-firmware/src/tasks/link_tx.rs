//! ESP-NOW send task
//!
//! Delivery is fire-and-forget: a failed send is logged and not retried.

use defmt::*;
use esp_wifi::esp_now::EspNowSender;

use summit_protocol::PeerAddress;

use crate::channels::OUTBOUND;

#[embassy_executor::task]
pub async fn link_tx_task(mut sender: EspNowSender<'static>, peer: PeerAddress) {
    info!("Link TX task started, peer {}", peer);

    loop {
        let message = OUTBOUND.receive().await;
        trace!("TX {}", message.kind);

        if let Err(e) = sender.send_async(&peer.octets(), &message.encode()).await {
            warn!("Send {} to {} failed: {}", message.kind, peer, Debug2Format(&e));
        }
    }
}
