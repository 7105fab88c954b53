/*
cargo run -p tiny-http1-demo-std-net --bin tiny_http1_demo_std_net_client httpbin.org 80 /ip
*/

use std::env;

use tiny_http1::PlainConnection;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let domain = env::args()
        .nth(1)
        .unwrap_or_else(|| env::var("DOMAIN").unwrap_or("httpbin.org".to_owned()));
    let port: u16 = env::args()
        .nth(2)
        .unwrap_or_else(|| env::var("PORT").unwrap_or("80".to_owned()))
        .parse()?;
    let uri = env::args()
        .nth(3)
        .unwrap_or_else(|| env::var("URI").unwrap_or("/ip".to_owned()));

    log::info!("client {domain} {port} {uri}");

    let mut connection = PlainConnection::new();
    connection.connect(&domain, port)?;

    let response = connection.send_message_and_receive(&uri, "")?;

    println!("{:?} {:?}", response.status(), response.headers());
    println!("{}", String::from_utf8_lossy(response.body()));

    Ok(())
}
