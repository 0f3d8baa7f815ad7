//! Full-page navigation used by the auth failure path.

/// Where the user lands when the session cannot be refreshed.
pub const LOGIN_PATH: &str = "/login";

/// Hard navigation capability.
pub trait Navigator {
    fn redirect(&self, path: &str);
}

/// Sets `window.location.href`. Off-browser it only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        log::info!("navigate: redirecting to {path}");
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.location().set_href(path) {
                log::error!("navigate: redirect to {path} failed: {e:?}");
            }
        }
    }
}
