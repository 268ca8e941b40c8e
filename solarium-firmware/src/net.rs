//! Wi-Fi and MQTT plumbing
//!
//! Owns the link to the broker: subscribes to the command topic, forwards
//! raw payloads to the command task, and publishes queued telemetry
//! records. A lost session is logged and reopened after a short delay;
//! nothing here is fatal to the rest of the firmware.

use cyw43::JoinOptions;
use cyw43_pio::PioSpi;
use defmt::{info, warn, Debug2Format};
use embassy_net::tcp::TcpSocket;
use embassy_net::{IpAddress, IpEndpoint, Stack};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_time::{Duration, Timer};
use embassy_futures::select::{select, Either};
use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;

use solarium_core::reading::TelemetryRecord;

use crate::channels::{CommandPayload, COMMANDS, TELEMETRY};
use crate::config;

#[embassy_executor::task]
pub async fn wifi_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
pub async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Join the configured network, retrying until it succeeds
pub async fn join_wifi(control: &mut cyw43::Control<'static>) {
    loop {
        match control
            .join(
                config::WIFI_SSID,
                JoinOptions::new(config::WIFI_PASSWORD.as_bytes()),
            )
            .await
        {
            Ok(()) => break,
            Err(err) => warn!("wifi join failed, status {}", err.status),
        }
    }
    info!("wifi joined: {}", config::WIFI_SSID);
}

#[embassy_executor::task]
pub async fn mqtt_task(stack: Stack<'static>) {
    stack.wait_config_up().await;
    info!("network up");

    loop {
        session(stack).await;
        Timer::after(Duration::from_secs(config::RECONNECT_DELAY_SECS)).await;
        info!("reconnecting to broker");
    }
}

/// Owned copy of one session event, so broker buffers are released before
/// the next client call
enum Event {
    Publish(TelemetryRecord),
    Command(CommandPayload),
}

/// One broker session; returns when the connection is lost
async fn session(stack: Stack<'static>) {
    let mut rx_buffer = [0u8; 1024];
    let mut tx_buffer = [0u8; 1024];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(90)));

    let endpoint = IpEndpoint::new(IpAddress::Ipv4(config::BROKER_ADDR), config::BROKER_PORT);
    if let Err(e) = socket.connect(endpoint).await {
        warn!("broker TCP connect failed: {}", e);
        return;
    }

    let mut mqtt_config = ClientConfig::new(MqttVersion::MQTTv5, CountingRng(20000));
    mqtt_config.add_client_id(config::MQTT_CLIENT_ID);
    mqtt_config.add_max_subscribe_qos(QualityOfService::QoS1);
    mqtt_config.max_packet_size = 1024;
    mqtt_config.keep_alive = 120;

    let mut recv_buffer = [0u8; 1024];
    let mut write_buffer = [0u8; 1024];
    let mut client = MqttClient::<_, 5, _>::new(
        socket,
        &mut write_buffer,
        1024,
        &mut recv_buffer,
        1024,
        mqtt_config,
    );

    if let Err(rc) = client.connect_to_broker().await {
        warn!("broker handshake failed: {}", Debug2Format(&rc));
        return;
    }
    if let Err(rc) = client.subscribe_to_topic(config::TOPIC_CMDS).await {
        warn!("subscribe failed: {}", Debug2Format(&rc));
        return;
    }
    info!("connected to broker, subscribed to {}", config::TOPIC_CMDS);

    loop {
        let event = match select(TELEMETRY.receive(), client.receive_message()).await {
            Either::First(record) => Some(Event::Publish(record)),
            Either::Second(Ok((topic, payload))) => {
                if topic == config::TOPIC_CMDS {
                    let mut buf = CommandPayload::new();
                    if buf.extend_from_slice(payload).is_err() {
                        warn!("oversized command payload ({} bytes), dropped", payload.len());
                        None
                    } else {
                        Some(Event::Command(buf))
                    }
                } else {
                    None
                }
            }
            Either::Second(Err(rc)) => {
                warn!("broker receive failed: {}", Debug2Format(&rc));
                return;
            }
        };

        match event {
            Some(Event::Publish(record)) => {
                let json = match record.to_json() {
                    Ok(json) => json,
                    Err(_) => {
                        warn!("telemetry serialization failed, record dropped");
                        continue;
                    }
                };
                if let Err(rc) = client
                    .send_message(
                        config::TOPIC_STATS,
                        json.as_bytes(),
                        QualityOfService::QoS0,
                        false,
                    )
                    .await
                {
                    warn!("telemetry publish failed: {}", Debug2Format(&rc));
                    return;
                }
            }
            Some(Event::Command(buf)) => {
                if COMMANDS.try_send(buf).is_err() {
                    warn!("command queue full, payload dropped");
                }
            }
            None => {}
        }
    }
}
