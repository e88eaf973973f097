use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use jadewater::advisor::{
    recommendations_prompt, request_advisory, savings_insight_prompt, tip_prompt, Advisory,
    OpenAiAdvisor, Prompt, TextGenerator,
};
use jadewater::config::DashboardConfig;
use jadewater::household::{average_usage_of, generate_dataset, Dataset, Fixture};
use jadewater::tips::sample_tips;

use crate::action::Action;
use crate::components::{
    FeedbackView, Header, HelpModal, RegionalView, SavingsView, StatusBar, TabBar, TipsView,
};
use crate::effects::EffectManager;
use crate::ui::layout::main_layout;
use crate::ui::Theme;

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Feedback,
    Recommendations,
    Savings,
    Regional,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Feedback, Tab::Recommendations, Tab::Savings, Tab::Regional];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Feedback => "Real-Time Feedback",
            Tab::Recommendations => "Recommendations",
            Tab::Savings => "Savings Calculator",
            Tab::Regional => "Regional Insights",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Feedback => 0,
            Tab::Recommendations => 1,
            Tab::Savings => 2,
            Tab::Regional => 3,
        }
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Modal state
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    None,
    Help,
}

/// Which view an advisor reply belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryTopic {
    Fixture(Fixture),
    SavingsInsight,
}

type AdvisoryReply = (AdvisoryTopic, Advisory);

/// Main application state
pub struct App {
    pub config: DashboardConfig,
    pub dataset: Dataset,
    pub tab: Tab,
    pub modal: ModalState,
    pub should_quit: bool,

    pub feedback: FeedbackView,
    pub tips: TipsView,
    pub savings: SavingsView,

    pub effects: EffectManager,

    advisor: Option<Arc<dyn TextGenerator>>,
    advisory_tx: UnboundedSender<AdvisoryReply>,
    advisory_rx: UnboundedReceiver<AdvisoryReply>,
    tip_rng: ChaCha8Rng,
}

impl App {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let generator = &config.generator;
        let dataset = generate_dataset(generator.num_households, generator.seed, &generator.params)
            .context("Failed to generate household dataset")?;
        info!(households = dataset.len(), seed = generator.seed, "dataset ready");

        let (advisor, advisor_note) = match OpenAiAdvisor::from_config(&config.advisor) {
            Ok(advisor) => (Some(Arc::new(advisor) as Arc<dyn TextGenerator>), None),
            Err(e) => {
                info!(reason = %e, "advisor off");
                (None, Some(e.to_string()))
            }
        };

        let (advisory_tx, advisory_rx) = mpsc::unbounded_channel();
        let measure_count = config.savings.measures.len();
        let tip_rng = ChaCha8Rng::seed_from_u64(config.generator.seed);

        Ok(Self {
            config,
            dataset,
            tab: Tab::Feedback,
            modal: ModalState::None,
            should_quit: false,
            feedback: FeedbackView::new(),
            tips: TipsView::new(advisor_note),
            savings: SavingsView::new(measure_count),
            effects: EffectManager::new(),
            advisor,
            advisory_tx,
            advisory_rx,
            tip_rng,
        })
    }

    /// Swap in a different text generator
    pub fn with_advisor(mut self, advisor: Arc<dyn TextGenerator>) -> Self {
        self.advisor = Some(advisor);
        self.tips.advisor_note = None;
        self
    }

    pub fn is_loading(&self) -> bool {
        self.tips.pending || self.savings.pending
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ShowHelp => self.modal = ModalState::Help,
            Action::CloseModal => self.modal = ModalState::None,

            Action::NextTab => self.switch_tab(self.tab.next()),
            Action::PrevTab => self.switch_tab(self.tab.prev()),
            Action::GoToTab(index) => {
                if let Some(tab) = Tab::ALL.get(index) {
                    self.switch_tab(*tab);
                }
            }

            Action::Up => match self.tab {
                Tab::Feedback => self.feedback.picker.select_prev(),
                Tab::Recommendations => self.tips.picker.select_prev(),
                Tab::Savings => self.savings.prev_measure(),
                Tab::Regional => {}
            },
            Action::Down => match self.tab {
                Tab::Feedback => self.feedback.picker.select_next(),
                Tab::Recommendations => self.tips.picker.select_next(),
                Tab::Savings => self.savings.next_measure(),
                Tab::Regional => {}
            },

            Action::Select => match self.tab {
                Tab::Feedback => {
                    let ok = self.feedback.show_metric(&self.dataset);
                    self.effects.trigger_result(ok);
                }
                Tab::Recommendations => self.sample_tips(),
                Tab::Savings => self.savings.toggle_measure(),
                Tab::Regional => {}
            },
            Action::ToggleMeasure => {
                if self.tab == Tab::Savings {
                    self.savings.toggle_measure();
                }
            }
            Action::RequestAdvice => {
                if self.tab == Tab::Recommendations {
                    self.request_tip();
                }
            }
            Action::RequestRecommendations => {
                if self.tab == Tab::Recommendations {
                    let fixture = self.tips.picker.selected();
                    let prompt = recommendations_prompt(fixture);
                    self.dispatch_advisory(AdvisoryTopic::Fixture(fixture), prompt);
                }
            }
            Action::RaiseGoal => {
                if self.tab == Tab::Savings {
                    self.savings.raise_goal();
                }
            }
            Action::LowerGoal => {
                if self.tab == Tab::Savings {
                    self.savings.lower_goal();
                }
            }
            Action::RequestSavingsInsight => {
                if self.tab == Tab::Savings {
                    self.request_savings_insight();
                }
            }

            Action::Input(c) => {
                if self.tab == Tab::Savings {
                    self.savings.handle_char(c);
                }
            }
            Action::Backspace => {
                if self.tab == Tab::Savings {
                    self.savings.handle_backspace();
                }
            }

            Action::Tick => self.poll_advisories(),
            Action::None => {}
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.effects.trigger_tab_change();
        }
    }

    fn sample_tips(&mut self) {
        let fixture = self.tips.picker.selected();
        let tips = sample_tips(fixture, self.config.tips_per_request, &mut self.tip_rng);
        self.tips.show_tips(fixture, tips);
    }

    fn request_tip(&mut self) {
        let fixture = self.tips.picker.selected();
        match average_usage_of(&self.dataset, fixture) {
            Ok(avg) => {
                self.dispatch_advisory(AdvisoryTopic::Fixture(fixture), tip_prompt(fixture, avg))
            }
            Err(e) => self.tips.finish(fixture, Advisory::Unavailable(e.to_string())),
        }
    }

    fn request_savings_insight(&mut self) {
        match self.savings.goal_savings(&self.config.savings) {
            Ok(savings) => self.dispatch_advisory(
                AdvisoryTopic::SavingsInsight,
                savings_insight_prompt(savings.daily, savings.monthly),
            ),
            Err(message) => self.savings.finish_insight(Advisory::Unavailable(message)),
        }
    }

    /// Send the prompt on a background task; the reply arrives through `poll_advisories`
    fn dispatch_advisory(&mut self, topic: AdvisoryTopic, prompt: Prompt) {
        // One request in flight at a time
        if self.is_loading() {
            return;
        }

        let Some(advisor) = self.advisor.as_ref().map(Arc::clone) else {
            let reason = self
                .tips
                .advisor_note
                .clone()
                .unwrap_or_else(|| "advisor disabled".to_string());
            self.deliver(topic, Advisory::Unavailable(reason));
            self.effects.trigger_result(false);
            return;
        };

        debug!(?topic, "dispatching advisory request");
        match topic {
            AdvisoryTopic::Fixture(_) => self.tips.pending = true,
            AdvisoryTopic::SavingsInsight => self.savings.pending = true,
        }
        let tx = self.advisory_tx.clone();
        tokio::spawn(async move {
            let advisory = request_advisory(advisor.as_ref(), &prompt).await;
            // Receiver only drops when the app exits
            let _ = tx.send((topic, advisory));
        });
    }

    pub fn poll_advisories(&mut self) {
        while let Ok((topic, advisory)) = self.advisory_rx.try_recv() {
            self.effects.trigger_result(advisory.is_available());
            self.deliver(topic, advisory);
        }
    }

    fn deliver(&mut self, topic: AdvisoryTopic, advisory: Advisory) {
        match topic {
            AdvisoryTopic::Fixture(fixture) => self.tips.finish(fixture, advisory),
            AdvisoryTopic::SavingsInsight => self.savings.finish_insight(advisory),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        // Set background color
        let bg_block = Block::default().style(Style::default().bg(Theme::BG));
        frame.render_widget(bg_block, frame.area());

        let (header_area, tabs_area, body, footer) = main_layout(frame.area());

        Header::render(frame, header_area, &self.dataset, self.is_loading());
        TabBar::render(frame, tabs_area, self.tab);

        match self.tab {
            Tab::Feedback => self.feedback.render(frame, body, &self.dataset),
            Tab::Recommendations => self.tips.render(frame, body),
            Tab::Savings => self.savings.render(frame, body, &self.config.savings),
            Tab::Regional => RegionalView::render(frame, body, &self.config.regions),
        }

        StatusBar::render(frame, footer, self.tab, self.modal != ModalState::None);

        // Modals (rendered last, on top)
        if self.modal == ModalState::Help {
            HelpModal::render(frame, frame.area());
        }
    }

    /// Render with visual effects
    pub fn render_with_effects(&mut self, frame: &mut Frame, elapsed: Duration) {
        // First do the normal render
        self.render(frame);

        let area = frame.area();
        let (header_area, _, body_area, _) = main_layout(area);

        // Process startup fade-in effect (affects whole screen)
        self.effects.process(elapsed, frame.buffer_mut(), area);

        // Pulse the header while an advisor request is in flight
        let loading = self.is_loading();
        self.effects.process_loading(elapsed, frame.buffer_mut(), header_area, loading);

        self.effects.process_body(elapsed, frame.buffer_mut(), body_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jadewater::error::AdvisorError;

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(&self, prompt: &Prompt) -> Result<String, AdvisorError> {
            Ok(format!("echo: {}", prompt.max_tokens))
        }
    }

    fn offline_app() -> App {
        let mut config = DashboardConfig::default();
        config.advisor.enabled = false;
        App::new(config).unwrap()
    }

    #[test]
    fn test_tabs_cycle() {
        assert_eq!(Tab::Feedback.next(), Tab::Recommendations);
        assert_eq!(Tab::Regional.next(), Tab::Feedback);
        assert_eq!(Tab::Feedback.prev(), Tab::Regional);
        for (i, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(tab.index(), i);
        }
    }

    #[test]
    fn test_new_app_generates_configured_dataset() {
        let app = offline_app();
        assert_eq!(app.dataset.len(), 100);
        assert_eq!(app.dataset.seed(), Some(42));
        assert_eq!(app.tips.advisor_note.as_deref(), Some("advisor is disabled"));
    }

    #[test]
    fn test_zero_households_fails_startup() {
        let mut config = DashboardConfig::default();
        config.advisor.enabled = false;
        config.generator.num_households = 0;
        assert!(App::new(config).is_err());
    }

    #[test]
    fn test_actions_route_to_active_tab() {
        let mut app = offline_app();

        app.handle_action(Action::Down);
        app.handle_action(Action::Select);
        let metric = app.feedback.metric.clone().unwrap().unwrap();
        assert_eq!(metric.fixture, Fixture::Laundry);

        // Digits only reach the usage field on the savings tab
        app.handle_action(Action::Input('7'));
        assert_eq!(app.savings.input, "100");

        app.handle_action(Action::GoToTab(2));
        assert_eq!(app.tab, Tab::Savings);
        app.handle_action(Action::Backspace);
        app.handle_action(Action::Input('7'));
        assert_eq!(app.savings.input, "107");

        app.handle_action(Action::ToggleMeasure);
        assert_eq!(app.savings.chosen, vec![true, false, false]);

        app.handle_action(Action::GoToTab(9));
        assert_eq!(app.tab, Tab::Savings);
    }

    #[test]
    fn test_sample_tips_respects_configured_count() {
        let mut app = offline_app();
        app.handle_action(Action::NextTab);
        app.handle_action(Action::Select);

        assert_eq!(app.tips.tips_fixture, Some(Fixture::Shower));
        assert_eq!(app.tips.tips.len(), 2);
    }

    #[test]
    fn test_advice_without_advisor_is_unavailable() {
        let mut app = offline_app();
        app.handle_action(Action::NextTab);
        app.handle_action(Action::RequestAdvice);

        assert!(!app.is_loading());
        let (_, advisory) = app.tips.advisory.clone().unwrap();
        assert_eq!(advisory, Advisory::Unavailable("advisor is disabled".to_string()));
    }

    #[test]
    fn test_goal_keys_only_move_goal_on_savings() {
        let mut app = offline_app();
        app.handle_action(Action::RaiseGoal);
        assert_eq!(app.savings.goal, 10);

        app.handle_action(Action::GoToTab(2));
        app.handle_action(Action::RaiseGoal);
        app.handle_action(Action::RaiseGoal);
        app.handle_action(Action::LowerGoal);
        assert_eq!(app.savings.goal, 11);
    }

    #[test]
    fn test_savings_insight_without_advisor_is_unavailable() {
        let mut app = offline_app();
        app.handle_action(Action::GoToTab(2));
        app.handle_action(Action::RequestSavingsInsight);

        assert!(!app.is_loading());
        assert_eq!(
            app.savings.insight,
            Some(Advisory::Unavailable("advisor is disabled".to_string()))
        );
        assert!(app.tips.advisory.is_none());
    }

    #[tokio::test]
    async fn test_savings_insight_arrives_through_channel() {
        let mut app = offline_app().with_advisor(Arc::new(Echo));
        app.handle_action(Action::GoToTab(2));
        app.handle_action(Action::RequestSavingsInsight);
        assert!(app.savings.pending);

        // A second request waits for the first
        app.handle_action(Action::GoToTab(1));
        app.handle_action(Action::RequestRecommendations);
        assert!(!app.tips.pending);

        for _ in 0..100 {
            app.handle_action(Action::Tick);
            if !app.is_loading() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(app.savings.insight, Some(Advisory::Tip("echo: 150".to_string())));
        assert!(app.tips.advisory.is_none());
    }

    #[tokio::test]
    async fn test_advice_arrives_through_channel() {
        let mut app = offline_app().with_advisor(Arc::new(Echo));
        app.handle_action(Action::NextTab);
        app.handle_action(Action::RequestRecommendations);
        assert!(app.is_loading());

        for _ in 0..100 {
            app.handle_action(Action::Tick);
            if !app.is_loading() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert!(!app.is_loading());
        let (fixture, advisory) = app.tips.advisory.clone().unwrap();
        assert_eq!(fixture, Fixture::Shower);
        assert_eq!(advisory, Advisory::Tip("echo: 200".to_string()));
    }
}
