// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::BufRead;
use std::io::Write;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use flashdeck_core::error::ErrorReport;
use flashdeck_core::error::Fallible;
use flashdeck_core::error::fail;
use flashdeck_core::rng::TinyRng;
use tokio::net::TcpStream;
use tokio::time::sleep;
use tokio::time::timeout;

/// How long a local server gets to start accepting connections.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn wait_for_server(host: &str, port: u16) -> Fallible<()> {
    wait_for_server_within(host, port, STARTUP_TIMEOUT).await
}

pub async fn wait_for_server_within(host: &str, port: u16, limit: Duration) -> Fallible<()> {
    let connect = async {
        loop {
            if let Ok(stream) = TcpStream::connect(format!("{host}:{port}")).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
    };
    timeout(limit, connect).await.map_err(|_| {
        ErrorReport::network(format!(
            "no server answered on {host}:{port} within {}ms",
            limit.as_millis()
        ))
    })
}

/// An RNG seeded from the wall clock.
pub fn clock_rng() -> TinyRng {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    TinyRng::from_seed(seed)
}

/// Print a prompt and read one line from stdin, without the trailing
/// newline.
pub fn prompt_line(prompt: &str) -> Fallible<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return fail("no input");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
