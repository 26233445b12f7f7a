use bank_auth::PresentationSink;
use std::sync::Mutex;

/// Screens the app can show
#[derive(Clone, PartialEq, Debug, Default)]
pub enum Screen {
    #[default]
    Login,
    Home {
        user_id: String,
    },
}

/// Navigation triggered by the login screen
pub trait LoginRouter: Send + Sync {
    fn route_to_home(&self, user_id: &str);
}

/// Router that just remembers which screen is showing
#[derive(Debug, Default)]
pub struct ScreenRouter {
    current: Mutex<Screen>,
}

impl ScreenRouter {
    pub fn current(&self) -> Screen {
        match self.current.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LoginRouter for ScreenRouter {
    fn route_to_home(&self, user_id: &str) {
        log::info!("Navigating to home for {}", user_id);
        if let Ok(mut guard) = self.current.lock() {
            *guard = Screen::Home {
                user_id: user_id.to_string(),
            };
        }
    }
}

/// Presentation side of the login screen: routes on success, raises an
/// alert on error
pub struct LoginPresenter<R: LoginRouter> {
    router: R,
    alerts: Mutex<Vec<String>>,
}

impl<R: LoginRouter> LoginPresenter<R> {
    pub fn new(router: R) -> Self {
        Self {
            router,
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Alerts raised so far, oldest first. Clears the list.
    pub fn take_alerts(&self) -> Vec<String> {
        match self.alerts.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        }
    }
}

impl<R: LoginRouter> PresentationSink for LoginPresenter<R> {
    fn on_success(&self, user_id: String) {
        self.router.route_to_home(&user_id);
    }

    fn on_error(&self, message: String) {
        log::warn!("Login alert: {}", message);
        if let Ok(mut guard) = self.alerts.lock() {
            guard.push(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RouterSpy {
        calls: Mutex<Vec<String>>,
    }

    impl LoginRouter for RouterSpy {
        fn route_to_home(&self, user_id: &str) {
            self.calls.lock().unwrap().push(user_id.to_string());
        }
    }

    #[test]
    fn test_success_routes_to_home() {
        let presenter = LoginPresenter::new(RouterSpy::default());
        presenter.on_success("42".to_string());

        assert_eq!(*presenter.router().calls.lock().unwrap(), vec!["42".to_string()]);
        assert!(presenter.take_alerts().is_empty());
    }

    #[test]
    fn test_error_raises_alert_without_routing() {
        let presenter = LoginPresenter::new(RouterSpy::default());
        presenter.on_error("Request failed".to_string());

        assert!(presenter.router().calls.lock().unwrap().is_empty());
        assert_eq!(presenter.take_alerts(), vec!["Request failed".to_string()]);
        assert!(presenter.take_alerts().is_empty());
    }

    #[test]
    fn test_screen_router_tracks_home() {
        let router = ScreenRouter::default();
        assert_eq!(router.current(), Screen::Login);
        router.route_to_home("u-1");
        assert_eq!(
            router.current(),
            Screen::Home {
                user_id: "u-1".to_string()
            }
        );
    }
}
