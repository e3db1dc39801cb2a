use std::sync::atomic::{AtomicBool, Ordering};

/// Connection status of the player's wallet. The game only reads the status
/// to gate submission; key material never enters this process.
pub trait WalletSession: Send + Sync {
    fn is_connected(&self) -> bool;
    fn connect(&self);
}

#[derive(Debug, Default)]
pub struct InMemoryWallet {
    connected: AtomicBool,
}

impl InMemoryWallet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WalletSession for InMemoryWallet {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    fn connect(&self) {
        self.connected.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryWallet, WalletSession};

    #[test]
    fn wallet_starts_disconnected() {
        assert!(!InMemoryWallet::new().is_connected());
    }

    #[test]
    fn connect_flips_the_status_and_stays_connected() {
        let wallet = InMemoryWallet::new();

        wallet.connect();
        wallet.connect();

        assert!(wallet.is_connected());
    }
}
