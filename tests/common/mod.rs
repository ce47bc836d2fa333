//! Common test utilities: random sample laptops and an in-process server.
#![allow(dead_code)] // Not every test binary uses every helper

use laptop_daemon::pb::keyboard::Layout;
use laptop_daemon::pb::laptop::Weight;
use laptop_daemon::pb::memory::Unit;
use laptop_daemon::pb::screen::{Panel, Resolution};
use laptop_daemon::pb::storage::Driver;
use laptop_daemon::pb::{
    Cpu, Gpu, Keyboard, Laptop, LaptopServiceClient, Memory, Screen, Storage,
};
use laptop_daemon::LaptopDaemonService;
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;

fn pick<'a>(rng: &mut impl Rng, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

pub fn new_cpu(rng: &mut impl Rng) -> Cpu {
    let brand = pick(rng, &["Intel", "AMD"]);
    let name = if brand == "Intel" {
        pick(rng, &["Core i5-1135G7", "Core i7-1165G7", "Core i9-11980HK"])
    } else {
        pick(rng, &["Ryzen 5 5600U", "Ryzen 7 5800U", "Ryzen 9 5900HX"])
    };
    let number_cores = rng.gen_range(2..=8);
    let min_ghz = rng.gen_range(2.0..3.5);

    Cpu {
        brand: brand.to_string(),
        name: name.to_string(),
        number_cores,
        number_threads: rng.gen_range(number_cores..=12),
        min_ghz,
        max_ghz: rng.gen_range(min_ghz..5.0),
    }
}

pub fn new_gpu(rng: &mut impl Rng) -> Gpu {
    let min_ghz = rng.gen_range(1.0..1.5);
    Gpu {
        brand: pick(rng, &["NVIDIA", "AMD"]).to_string(),
        name: pick(rng, &["RTX 3060", "RTX 3070", "RX 6600M"]).to_string(),
        min_ghz,
        max_ghz: rng.gen_range(min_ghz..2.0),
        memory: Some(Memory::new(rng.gen_range(2..=8), Unit::Gigabyte)),
    }
}

pub fn new_laptop(rng: &mut impl Rng) -> Laptop {
    let brand = pick(rng, &["Apple", "Dell", "Lenovo"]);
    let name = match brand {
        "Apple" => pick(rng, &["MacBook Air", "MacBook Pro"]),
        "Dell" => pick(rng, &["Latitude", "Vostro", "XPS"]),
        _ => pick(rng, &["Thinkpad X1", "Thinkpad P1", "Thinkpad P53"]),
    };
    let height = rng.gen_range(1080..=4320);

    Laptop {
        id: String::new(),
        brand: brand.to_string(),
        name: name.to_string(),
        cpu: Some(new_cpu(rng)),
        ram: Some(Memory::new(rng.gen_range(4..=64), Unit::Gigabyte)),
        gpus: vec![new_gpu(rng)],
        storages: vec![
            Storage {
                driver: Driver::Ssd.into(),
                memory: Some(Memory::new(rng.gen_range(128..=1024), Unit::Gigabyte)),
            },
            Storage {
                driver: Driver::Hdd.into(),
                memory: Some(Memory::new(rng.gen_range(1..=6), Unit::Terabyte)),
            },
        ],
        screen: Some(Screen {
            size_inch: rng.gen_range(13.0..17.0),
            resolution: Some(Resolution {
                width: height * 16 / 9,
                height,
            }),
            panel: pick_panel(rng).into(),
            multitouch: rng.gen_bool(0.5),
        }),
        keyboard: Some(Keyboard {
            layout: Layout::Qwerty.into(),
            backlit: rng.gen_bool(0.5),
        }),
        weight: Some(Weight::WeightKg(rng.gen_range(1.0..3.0))),
        price_usd: rng.gen_range(1500.0..3500.0),
        release_year: rng.gen_range(2015..=2021),
        updated_at_unix: 0,
    }
}

fn pick_panel(rng: &mut impl Rng) -> Panel {
    if rng.gen_bool(0.5) {
        Panel::Ips
    } else {
        Panel::Oled
    }
}

/// Laptop with exact values for filter tests.
pub fn laptop_with(id: &str, price_usd: f64, cores: u32, min_ghz: f64, ram: Memory) -> Laptop {
    let mut laptop = new_laptop(&mut rand::thread_rng());
    laptop.id = id.to_string();
    laptop.price_usd = price_usd;
    laptop.ram = Some(ram);
    if let Some(cpu) = laptop.cpu.as_mut() {
        cpu.number_cores = cores;
        cpu.min_ghz = min_ghz;
    }
    laptop
}

/// Bind to port 0, spawn the gRPC server, and return a connected client.
pub async fn start_server(service: LaptopDaemonService) -> LaptopServiceClient<Channel> {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(service.into_server())
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    LaptopServiceClient::connect(format!("http://{addr}"))
        .await
        .unwrap()
}
