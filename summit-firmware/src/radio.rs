//! ESP-NOW bring-up and the outbound queue
//!
//! The Wi-Fi driver runs in station mode without associating; ESP-NOW
//! frames go straight to the single configured peer on the current
//! channel, unencrypted.

use defmt::*;
use esp_hal::peripherals::{RNG, TIMG0, WIFI};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use esp_wifi::esp_now::{EspNowReceiver, EspNowSender, EspNowWifiInterface, PeerInfo};
use esp_wifi::wifi::{WifiController, WifiMode};
use esp_wifi::EspWifiController;

use summit_core::units::Outbox;
use summit_protocol::PeerAddress;

use crate::channels::OUTBOUND;
use crate::mk_static;

/// Radio bring-up errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum RadioError {
    /// esp-wifi could not start
    Init,
    /// Station mode could not be configured or started
    Wifi,
    /// The peer could not be registered
    Peer,
}

/// Both halves of the link, ready to hand to the link tasks
pub struct Radio {
    pub sender: EspNowSender<'static>,
    pub receiver: EspNowReceiver<'static>,
}

/// Start the radio and register `peer`
pub fn init(
    timg: TIMG0<'static>,
    rng: RNG<'static>,
    wifi: WIFI<'static>,
    peer: PeerAddress,
) -> Result<Radio, RadioError> {
    let timer = TimerGroup::new(timg);
    let wifi_init = esp_wifi::init(timer.timer0, Rng::new(rng)).map_err(|e| {
        error!("esp-wifi init failed: {}", Debug2Format(&e));
        RadioError::Init
    })?;
    let wifi_ctrl = &*mk_static!(EspWifiController<'static>, wifi_init);

    let (controller, interfaces) = esp_wifi::wifi::new(wifi_ctrl, wifi).map_err(|e| {
        error!("Wi-Fi driver failed: {}", Debug2Format(&e));
        RadioError::Wifi
    })?;

    // Dropping the controller would stop the radio
    let controller = mk_static!(WifiController<'static>, controller);
    controller
        .set_mode(WifiMode::Sta)
        .and_then(|_| controller.start())
        .map_err(|e| {
            error!("Station mode failed: {}", Debug2Format(&e));
            RadioError::Wifi
        })?;

    let esp_now = interfaces.esp_now;
    esp_now
        .add_peer(PeerInfo {
            interface: EspNowWifiInterface::Sta,
            peer_address: peer.octets(),
            lmk: None,
            channel: None,
            encrypt: false,
        })
        .map_err(|e| {
            error!("Adding peer {} failed: {}", peer, Debug2Format(&e));
            RadioError::Peer
        })?;

    let (_manager, sender, receiver) = esp_now.split();
    info!("ESP-NOW ready, peer {}", peer);

    Ok(Radio { sender, receiver })
}

/// Hand a unit's queued messages to the link TX task
pub fn send_all(outbox: Outbox) {
    for message in outbox {
        if OUTBOUND.try_send(message).is_err() {
            warn!("Outbound channel full, dropping {}", message.kind);
        }
    }
}
