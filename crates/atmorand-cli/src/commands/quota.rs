use atmorand_core::{HttpIntegerClient, JsonRpcClient};

pub fn run(api_key: Option<&str>) {
    match api_key {
        Some(key) => run_json_rpc(key),
        None => run_http(),
    }
}

/// Per-key quota via JSON-RPC `getUsage`.
fn run_json_rpc(api_key: &str) {
    let client = match JsonRpcClient::new(api_key) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to build JSON-RPC client: {e}");
            std::process::exit(1);
        }
    };
    match client.get_usage() {
        Ok(usage) => {
            println!("API key status: {}", usage.status);
            println!("Bits left:      {}", usage.bits_left);
            println!("Requests left:  {}", usage.requests_left);
            if let Some(total) = usage.total_bits {
                println!("Total bits:     {total}");
            }
            if let Some(total) = usage.total_requests {
                println!("Total requests: {total}");
            }
        }
        Err(e) => {
            eprintln!("Failed to fetch usage: {e}");
            std::process::exit(1);
        }
    }
}

/// Per-IP quota via the plain HTTP endpoint.
fn run_http() {
    let client = match HttpIntegerClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };
    match client.quota() {
        Ok(bits) => {
            println!("Remaining quota for this IP: {bits} bits");
            if bits <= 0 {
                println!("Quota exhausted — requests will fail until it replenishes.");
            }
        }
        Err(e) => {
            eprintln!("Failed to fetch quota: {e}");
            std::process::exit(1);
        }
    }
}
