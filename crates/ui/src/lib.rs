pub fn module_ready() -> bool {
    true
}

pub fn index_html() -> &'static str {
    include_str!("../static/index.html")
}

pub fn styles_css() -> &'static str {
    include_str!("../static/styles.css")
}

pub fn app_js() -> &'static str {
    include_str!("../static/app.js")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_bundle_contains_index_html() {
        let html = index_html();

        assert!(html.contains("<!doctype html>"));
        assert!(html.contains("/static/styles.css"));
        assert!(html.contains("/static/app.js"));
    }

    #[test]
    fn ui_shell_contains_game_and_leaderboard_panels() {
        let html = index_html();

        assert!(html.contains("Crash Dash"));
        assert!(html.contains("id=\"sell-button\""));
        assert!(html.contains("id=\"leaderboard-panel\""));
        assert!(html.contains("/game/chart.svg"));
    }

    #[test]
    fn app_js_wires_the_event_socket_and_endpoints() {
        let js = app_js();

        assert!(js.contains("/ws/events"));
        assert!(js.contains("/game/start"));
        assert!(js.contains("/game/score/submit"));
        assert!(js.contains("/leaderboard"));
    }
}
