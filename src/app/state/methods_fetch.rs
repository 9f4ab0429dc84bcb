use super::*;

impl WeatherStore {
    /// Searches `name` and loads its weather. The typed text becomes the label
    /// and device mode is left.
    pub fn load_by_name(&mut self, name: &str, tx: &mpsc::Sender<AppEvent>) {
        let name = name.trim().to_string();
        self.view.is_using_device_location = false;
        self.view.location_label.clone_from(&name);
        let token = self.begin_fetch();
        tracing::info!(token, place = %name, "loading weather by name");

        let fetcher = self.fetcher.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match fetcher.fetch_by_place_name(&name).await {
                Ok(snapshot) => AppEvent::FetchSucceeded {
                    token,
                    snapshot,
                    place_label: None,
                },
                Err(error) => AppEvent::FetchFailed { token, error },
            };
            let _ = tx2.send(event).await;
        });
    }

    /// Loads weather for a device position. The place label is looked up
    /// alongside the forecast and only applied while device mode holds.
    pub fn load_by_coordinates(&mut self, coords: Coordinates, tx: &mpsc::Sender<AppEvent>) {
        self.view.is_using_device_location = true;
        let token = self.begin_fetch();
        tracing::info!(
            token,
            lat = coords.latitude,
            lon = coords.longitude,
            "loading weather by coordinates"
        );

        let fetcher = self.fetcher.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let (forecast, placemark) = tokio::join!(
                fetcher.fetch_by_coordinates(coords),
                fetcher.placemark(coords)
            );
            let event = match forecast {
                Ok(snapshot) => AppEvent::FetchSucceeded {
                    token,
                    snapshot,
                    place_label: Some(place_label(placemark.as_ref())),
                },
                Err(error) => AppEvent::FetchFailed { token, error },
            };
            let _ = tx2.send(event).await;
        });
    }

    pub(crate) fn begin_fetch(&mut self) -> u64 {
        self.latest_token = self.latest_token.wrapping_add(1);
        self.view.is_loading = true;
        self.view.error_message = None;
        self.view.phase = FetchPhase::Loading;
        self.publish();
        self.latest_token
    }

    pub(crate) fn handle_fetch_succeeded(
        &mut self,
        token: u64,
        snapshot: WeatherSnapshot,
        label: Option<String>,
    ) {
        if token != self.latest_token {
            tracing::debug!(token, latest = self.latest_token, "discarding stale forecast");
            return;
        }

        let shown = snapshot.converted(Units::Fahrenheit, self.view.units);
        self.view.current_temperature = shown.current_temperature;
        self.view.current_category = shown.current_category;
        self.view.current_condition = Some(shown.current_condition);
        self.view.forecast = shown.forecast;
        self.view.hourly = shown.hourly;
        if self.view.is_using_device_location
            && let Some(label) = label
        {
            self.view.location_label = label;
        }
        self.snapshot = Some(snapshot);

        self.view.apply_clock((self.clock)());
        self.view.is_loading = false;
        self.view.error_message = None;
        self.view.phase = FetchPhase::Loaded;
        tracing::debug!(token, category = ?self.view.current_category, "forecast applied");
        self.publish();
    }

    pub(crate) fn handle_fetch_failed(&mut self, token: u64, error: &WeatherError) {
        if token != self.latest_token {
            tracing::debug!(token, latest = self.latest_token, "discarding stale failure");
            return;
        }

        tracing::warn!(token, "forecast fetch failed: {error}");
        self.view.is_loading = false;
        self.view.error_message = Some(error.user_message());
        self.view.phase = FetchPhase::Error;
        self.publish();
    }
}
