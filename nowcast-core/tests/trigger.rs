//! End-to-end trigger tests: mock HTTP on one side, a recording presenter on
//! the other.

use async_trait::async_trait;
use nowcast_core::{
    Config, Coordinate, DisplayRequest, ErrorKind, Geolocator, Notice, Outcome, Presenter, Stage,
    TriggerOptions, WeatherError, WeatherService, service_from_config, trigger,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[derive(Debug, Default)]
struct Recorder {
    rendered: Vec<DisplayRequest>,
    notices: Vec<String>,
    errors: Vec<Option<ErrorKind>>,
}

impl Presenter for Recorder {
    fn render(&mut self, request: &DisplayRequest) {
        self.rendered.push(request.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.to_string());
        self.errors.push(notice.error().map(WeatherError::kind));
    }
}

#[derive(Debug)]
struct FixedLocation(Coordinate);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Coordinate, WeatherError> {
        Ok(self.0)
    }
}

#[derive(Debug)]
struct Denied;

#[async_trait]
impl Geolocator for Denied {
    async fn locate(&self) -> Result<Coordinate, WeatherError> {
        Err(WeatherError::malformed(Stage::Geolocate, "permission denied"))
    }
}

fn service_for(server: &MockServer) -> WeatherService {
    let mut config = Config::default();
    config.endpoints.geocode = format!("{}/search", server.uri());
    config.endpoints.forecast = format!("{}/v1/forecast", server.uri());
    let http = config.http_client().expect("client builds");
    service_from_config(&config, &http)
}

async fn mount_geocode(server: &MockServer, body: serde_json::Value, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

fn cloudy_forecast() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "current_weather": { "temperature": 21.5, "weathercode": 3, "windspeed": 4.2 }
    }))
}

#[tokio::test]
async fn submit_renders_place_result() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!([{ "lat": "12.34", "lon": "-56.78" }]), 1).await;
    mount_forecast(&server, cloudy_forecast(), 1).await;

    let service = service_for(&server);
    let mut recorder = Recorder::default();
    let outcome = trigger::submit(&service, "  Springfield ", TriggerOptions::default(), &mut recorder).await;

    assert_eq!(outcome, Outcome::Rendered);
    assert!(recorder.notices.is_empty());
    assert_eq!(recorder.rendered.len(), 1);

    let shown = &recorder.rendered[0];
    assert_eq!(shown.label, "Springfield");
    assert_eq!(shown.observation.temperature_c, 21.5);
    assert_eq!(shown.observation.wind_speed, 4.2);
    assert_eq!(shown.condition().description, "Partly cloudy");
}

#[tokio::test]
async fn blank_input_makes_no_request() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!([]), 0).await;
    mount_forecast(&server, cloudy_forecast(), 0).await;

    let service = service_for(&server);
    for input in ["", "   ", "\t\n"] {
        let mut recorder = Recorder::default();
        let outcome = trigger::submit(&service, input, TriggerOptions::default(), &mut recorder).await;

        assert_eq!(outcome, Outcome::Notified);
        assert!(recorder.rendered.is_empty());
        assert_eq!(
            recorder.notices,
            ["Please enter a city name or allow location access for auto-location."]
        );
    }
}

#[tokio::test]
async fn unknown_place_skips_forecast_and_notifies_once() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!([]), 1).await;
    mount_forecast(&server, cloudy_forecast(), 0).await;

    let service = service_for(&server);
    let mut recorder = Recorder::default();
    let outcome = trigger::submit(&service, "Atlantis", TriggerOptions::default(), &mut recorder).await;

    assert_eq!(outcome, Outcome::Notified);
    assert!(recorder.rendered.is_empty());
    assert_eq!(recorder.notices, ["Weather information not available. Please try another city."]);
    assert_eq!(recorder.errors, [Some(ErrorKind::NotFound)]);
}

#[tokio::test]
async fn forecast_failure_notifies_once_without_render() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!([{ "lat": "1.5", "lon": "2.5" }]), 1).await;
    mount_forecast(&server, ResponseTemplate::new(500), 1).await;

    let service = service_for(&server);
    let mut recorder = Recorder::default();
    let outcome = trigger::submit(&service, "Springfield", TriggerOptions::default(), &mut recorder).await;

    assert_eq!(outcome, Outcome::Notified);
    assert!(recorder.rendered.is_empty());
    assert_eq!(recorder.notices.len(), 1);
    assert_eq!(recorder.errors, [Some(ErrorKind::Network)]);
}

#[tokio::test]
async fn detailed_errors_name_the_cause() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!([]), 1).await;

    let service = service_for(&server);
    let mut recorder = Recorder::default();
    let options = TriggerOptions { detailed_errors: true };
    trigger::submit(&service, "Atlantis", options, &mut recorder).await;

    assert_eq!(
        recorder.notices,
        ["Weather information not available. (No match found for 'Atlantis') Please try another city."]
    );
}

#[tokio::test]
async fn located_coordinate_skips_geocoding() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!([]), 0).await;
    mount_forecast(&server, cloudy_forecast(), 1).await;

    let service = service_for(&server);
    let geolocator = FixedLocation(Coordinate::new(48.85, 2.35));
    let mut recorder = Recorder::default();
    let outcome =
        trigger::locate(&service, Some(&geolocator), TriggerOptions::default(), &mut recorder).await;

    assert_eq!(outcome, Outcome::Rendered);
    assert_eq!(recorder.rendered[0].label, "Latitude: 48.85, Longitude: 2.35");
}

#[tokio::test]
async fn denied_geolocation_asks_for_a_city() {
    let server = MockServer::start().await;
    mount_forecast(&server, cloudy_forecast(), 0).await;

    let service = service_for(&server);
    let mut recorder = Recorder::default();
    let outcome = trigger::locate(&service, Some(&Denied), TriggerOptions::default(), &mut recorder).await;

    assert_eq!(outcome, Outcome::Notified);
    assert_eq!(recorder.notices, ["Unable to retrieve your location. Please enter a city manually."]);
}

#[tokio::test]
async fn missing_geolocation_notifies_immediately() {
    let server = MockServer::start().await;
    mount_forecast(&server, cloudy_forecast(), 0).await;

    let service = service_for(&server);
    let mut recorder = Recorder::default();
    let outcome = trigger::locate(&service, None, TriggerOptions::default(), &mut recorder).await;

    assert_eq!(outcome, Outcome::Notified);
    assert_eq!(recorder.notices, ["Geolocation is not supported in this environment."]);
    assert_eq!(recorder.errors, [None::<ErrorKind>]);
}

#[tokio::test]
async fn coordinate_failure_suggests_trying_again() {
    let server = MockServer::start().await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "current_weather": {} })),
        1,
    )
    .await;

    let service = service_for(&server);
    let mut recorder = Recorder::default();
    let outcome = trigger::at_coordinate(
        &service,
        Coordinate::new(10.0, 20.0),
        TriggerOptions::default(),
        &mut recorder,
    )
    .await;

    assert_eq!(outcome, Outcome::Notified);
    assert_eq!(recorder.notices, ["Weather information not available. Please try again."]);
    assert_eq!(recorder.errors, [Some(ErrorKind::MalformedResponse)]);
}
