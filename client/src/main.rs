use std::io::{self, Write};
use std::net::UdpSocket;

mod run;
mod view;

fn main() {
    let server_addr = common::net::get_connectable_address();

    let name = loop {
        let input = prompt("Enter your name: ");
        match common::name::sanitize_name(&input) {
            Ok(name) => break name,
            Err(err) => println!("{}", err),
        }
    };

    let socket = UdpSocket::bind("0.0.0.0:0").expect("failed to bind socket");

    println!("Connecting to {}...", server_addr);
    run::run_client(socket, server_addr, name);
}

fn prompt(message: &str) -> String {
    print!("{}", message);
    io::stdout().flush().expect("failed to flush stdout");
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("failed to read from stdin");
    input.trim().to_string()
}
