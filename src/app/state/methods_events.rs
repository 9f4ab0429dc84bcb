use super::*;

impl WeatherStore {
    pub fn handle_event(&mut self, event: AppEvent, tx: &mpsc::Sender<AppEvent>) {
        match event {
            AppEvent::Bootstrap => {
                self.refresh_clock();
                let name = self.config.default_location.clone();
                self.load_by_name(&name, tx);
            }
            AppEvent::TickClock => self.refresh_clock(),
            AppEvent::SearchSubmitted(name) => self.load_by_name(&name, tx),
            AppEvent::CurrentLocationRequested => self.request_current_location(),
            AppEvent::ToggleUnit => self.toggle_unit(),
            AppEvent::Location(event) => self.handle_location_event(event, tx),
            AppEvent::FetchSucceeded {
                token,
                snapshot,
                place_label,
            } => self.handle_fetch_succeeded(token, snapshot, place_label),
            AppEvent::FetchFailed { token, error } => self.handle_fetch_failed(token, &error),
            AppEvent::Quit => self.running = false,
        }
    }

    fn handle_location_event(&mut self, event: LocationEvent, tx: &mpsc::Sender<AppEvent>) {
        match event {
            LocationEvent::AuthorizationChanged(status) => self.handle_authorization(status),
            LocationEvent::PositionUpdated(coords) => self.load_by_coordinates(coords, tx),
            LocationEvent::PositionFailed(reason) => {
                self.set_error(&WeatherError::LocationUnavailable(reason));
            }
        }
    }

    fn handle_authorization(&mut self, status: AuthorizationStatus) {
        if status == self.authorization {
            return;
        }
        tracing::debug!(from = ?self.authorization, to = ?status, "authorization changed");
        self.authorization = status;

        if status.is_authorized() {
            if let Some(provider) = &self.location {
                provider.request_position();
            }
            self.view.is_using_device_location = true;
            self.publish();
        } else if status.is_refused() {
            self.set_error(&WeatherError::PermissionDenied);
        }
    }
}
