//! Quick throughput verification - run with: cargo run --release --example bench_throughput
use std::time::Instant;

use encrypter_core::Encrypter;

fn bench_size(encrypter: &Encrypter, size: usize, iterations: usize) {
    // Pseudo-random data
    let data: Vec<u8> = (0..size).map(|i| ((i * 17 + 31) % 256) as u8).collect();

    let size_label = if size >= 1024 * 1024 {
        format!("{}MB", size / 1024 / 1024)
    } else if size >= 1024 {
        format!("{}KB", size / 1024)
    } else {
        format!("{}B", size)
    };

    println!("\n=== {} data, {} iterations ===", size_label, iterations);

    // Encrypt (IV + AES-256-CBC + HMAC-SHA-256 + base64)
    let token = {
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = encrypter.encrypt_bytes(&data);
        }
        let elapsed = start.elapsed();
        let bytes_per_sec = (size * iterations) as f64 / elapsed.as_secs_f64();
        println!("encrypt:         {:.2} MB/s", bytes_per_sec / 1e6);

        match encrypter.encrypt_bytes(&data) {
            Ok(token) => token,
            Err(e) => {
                eprintln!("encryption failed: {}", e);
                return;
            }
        }
    };

    // Decrypt (base64 + HMAC verify + AES-256-CBC)
    {
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = encrypter.decrypt_bytes(&token);
        }
        let elapsed = start.elapsed();
        let bytes_per_sec = (size * iterations) as f64 / elapsed.as_secs_f64();
        println!("decrypt:         {:.2} MB/s", bytes_per_sec / 1e6);
    }

    // Forged tokens are rejected after the MAC, before the cipher
    {
        let forged = encrypter_core::SealedToken::decode(&token).map(|mut sealed| {
            sealed.tag[0] ^= 0x01;
            sealed.encode()
        });
        if let Ok(forged) = forged {
            let start = Instant::now();
            for _ in 0..iterations {
                let _ = encrypter.decrypt_bytes(&forged);
            }
            let elapsed = start.elapsed();
            let bytes_per_sec = (size * iterations) as f64 / elapsed.as_secs_f64();
            println!("reject forged:   {:.2} MB/s", bytes_per_sec / 1e6);
        }
    }

    if let Ok((_, metrics)) = encrypter.encrypt_bytes_with_metrics(&data) {
        println!(
            "token expansion: {:.3}x (hardware AES: {})",
            metrics.expansion_ratio(),
            metrics.hardware_accelerated
        );
    }
}

fn main() {
    let encrypter = match Encrypter::new(&[0x01; 32], &[0x02; 32]) {
        Ok(encrypter) => encrypter,
        Err(e) => {
            eprintln!("cannot build encrypter: {}", e);
            std::process::exit(1);
        }
    };

    // Small data (call overhead visible)
    bench_size(&encrypter, 64, 100_000);
    bench_size(&encrypter, 1024, 50_000); // 1KB

    // Medium data (more realistic)
    bench_size(&encrypter, 64 * 1024, 2_000); // 64KB

    // Large data (peak throughput)
    bench_size(&encrypter, 1024 * 1024, 100); // 1MB

    println!("\nNote: small sizes show call overhead; larger sizes show peak throughput.");
}
