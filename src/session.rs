//! The shopper's screen state
//!
//! One process serves one shopper. Each screen owns its state behind its own
//! lock; nothing is shared between screens.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, MutexGuard};

use crate::assistant::{ChatProfiles, ChatScreen, ChatSession};
use crate::cart::{order_history, Cart, Order};
use crate::catalog::CatalogView;
use crate::home::HomeFeed;
use crate::profile::ProfileView;

/// Both assistant screens plus the RNG that seeds new sessions
pub struct ChatRooms {
    profiles: ChatProfiles,
    seeds: StdRng,
    page: ChatSession,
    widget: ChatSession,
}

impl ChatRooms {
    fn new(profiles: ChatProfiles, mut seeds: StdRng) -> Self {
        let page = ChatSession::open(profiles.page.clone(), StdRng::seed_from_u64(seeds.gen()));
        let widget =
            ChatSession::open(profiles.widget.clone(), StdRng::seed_from_u64(seeds.gen()));
        Self {
            profiles,
            seeds,
            page,
            widget,
        }
    }

    pub fn get(&self, screen: ChatScreen) -> &ChatSession {
        match screen {
            ChatScreen::Page => &self.page,
            ChatScreen::Widget => &self.widget,
        }
    }

    pub fn get_mut(&mut self, screen: ChatScreen) -> &mut ChatSession {
        match screen {
            ChatScreen::Page => &mut self.page,
            ChatScreen::Widget => &mut self.widget,
        }
    }

    /// Tear the screen's session down and open a fresh one
    pub fn reopen(&mut self, screen: ChatScreen) {
        let rng = StdRng::seed_from_u64(self.seeds.gen());
        let fresh = ChatSession::open(self.profiles.get(screen).clone(), rng);
        // The old session is dropped here, cancelling its pending replies
        *self.get_mut(screen) = fresh;
        tracing::debug!(?screen, "Chat session reopened");
    }
}

pub struct ShopSession {
    pub home: HomeFeed,
    pub orders: Vec<Order>,
    catalog: Mutex<CatalogView>,
    cart: Mutex<Cart>,
    profile: Mutex<ProfileView>,
    chats: Mutex<ChatRooms>,
}

impl ShopSession {
    /// Fresh session seeded from the mock data. A fixed seed makes reply
    /// selection reproducible.
    pub fn new(profiles: ChatProfiles, seed: Option<u64>) -> Self {
        let seeds = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            home: HomeFeed::seeded(),
            orders: order_history(),
            catalog: Mutex::new(CatalogView::default()),
            cart: Mutex::new(Cart::seeded()),
            profile: Mutex::new(ProfileView::default()),
            chats: Mutex::new(ChatRooms::new(profiles, seeds)),
        }
    }

    pub fn catalog(&self) -> MutexGuard<'_, CatalogView> {
        lock(&self.catalog)
    }

    pub fn cart(&self) -> MutexGuard<'_, Cart> {
        lock(&self.cart)
    }

    pub fn profile(&self) -> MutexGuard<'_, ProfileView> {
        lock(&self.profile)
    }

    pub fn chats(&self) -> MutexGuard<'_, ChatRooms> {
        lock(&self.chats)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_reopen_resets_to_greeting() {
        let session = ShopSession::new(ChatProfiles::default(), Some(5));
        {
            let mut chats = session.chats();
            assert!(chats.get_mut(ChatScreen::Widget).submit("hello"));
            assert_eq!(chats.get(ChatScreen::Widget).transcript().len(), 2);
            chats.reopen(ChatScreen::Widget);
        }

        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
        let chats = session.chats();
        assert_eq!(chats.get(ChatScreen::Widget).transcript().len(), 1);
        assert_eq!(chats.get(ChatScreen::Page).transcript().len(), 1);
    }

    #[test]
    fn test_screens_start_from_seed_data() {
        let session = ShopSession::new(ChatProfiles::default(), None);
        assert_eq!(session.cart().len(), 3);
        assert_eq!(session.catalog().visible().len(), 6);
        assert!(!session.profile().is_editing());
        assert_eq!(session.orders.len(), 3);
        assert_eq!(session.home.hot_deals.len(), 3);
    }
}
