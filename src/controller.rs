use crate::{
    config::Config,
    error::NavigationError,
    state::{MenuPresentationMode, NavigationState, ViewMode},
};
use log::debug;

/// Single source of truth for which screen is showing, and what the menu
/// should look like the next time it's shown. Screens that send the user back
/// to the menu call [Self::return_to_menu] and never need to know which menu
/// mode was active; the controller remembers it for them.
#[derive(Debug, Default)]
pub struct ViewContextController {
    state: NavigationState,
}

impl ViewContextController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on the menu, with a non-standard default presentation mode
    pub fn with_default(mode: MenuPresentationMode) -> Self {
        Self {
            state: NavigationState {
                current_view: ViewMode::Menu,
                previous_menu_context: mode,
            },
        }
    }

    /// Start on the menu, in the configured default mode
    pub fn from_config(config: &Config) -> Self {
        Self::with_default(config.default_menu_mode)
    }

    /// Get a copy of the current state
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// If the menu is showing, get the mode it should render in
    pub fn menu_presentation(&self) -> Option<MenuPresentationMode> {
        self.state
            .current_view
            .is_menu()
            .then_some(self.state.previous_menu_context)
    }

    /// Switch to a view. The menu context is left alone, even when switching
    /// to the menu.
    pub fn navigate_to(&mut self, view: ViewMode) {
        self.transition("navigate_to", |state| state.current_view = view);
    }

    /// Parse a view name, then navigate to it. An unknown name leaves state
    /// untouched
    pub fn try_navigate_to(
        &mut self,
        view: &str,
    ) -> Result<(), NavigationError> {
        let view = view.parse()?;
        self.navigate_to(view);
        Ok(())
    }

    /// Show the menu in the given mode, and remember that mode for future
    /// returns. Allowed from any view.
    pub fn enter_menu_context(&mut self, mode: MenuPresentationMode) {
        self.transition("enter_menu_context", |state| {
            state.current_view = ViewMode::Menu;
            state.previous_menu_context = mode;
        });
    }

    pub fn try_enter_menu_context(
        &mut self,
        mode: &str,
    ) -> Result<(), NavigationError> {
        let mode = mode.parse()?;
        self.enter_menu_context(mode);
        Ok(())
    }

    /// Go back to the menu, in whatever mode it was last entered in
    pub fn return_to_menu(&mut self) {
        self.transition("return_to_menu", |state| {
            state.current_view = ViewMode::Menu;
        });
    }

    /// Apply a mutation and log the before/after
    fn transition(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut NavigationState),
    ) {
        let old = self.state;
        f(&mut self.state);
        debug!("{name}: {old} -> {}", self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MenuPresentationMode::{ListView, ProgressionView};

    fn state(
        current_view: ViewMode,
        previous_menu_context: MenuPresentationMode,
    ) -> NavigationState {
        NavigationState {
            current_view,
            previous_menu_context,
        }
    }

    #[test]
    fn test_new() {
        let controller = ViewContextController::new();
        assert_eq!(controller.state(), state(ViewMode::Menu, ListView));
        assert_eq!(controller.menu_presentation(), Some(ListView));
    }

    #[test]
    fn test_with_default() {
        let controller = ViewContextController::with_default(ProgressionView);
        assert_eq!(controller.state(), state(ViewMode::Menu, ProgressionView));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            default_menu_mode: ProgressionView,
        };
        let controller = ViewContextController::from_config(&config);
        assert_eq!(controller.state(), state(ViewMode::Menu, ProgressionView));
        assert_eq!(controller.menu_presentation(), Some(ProgressionView));
    }

    /// Whatever the config file says, a fresh session starts on the menu
    #[test]
    fn test_from_loaded_config_starts_on_menu() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"{"default_menu_mode": "progression_view"}"#,
        )
        .unwrap();
        let (config, _) = Config::load_or_default(file.path()).unwrap();
        let controller = ViewContextController::from_config(&config);
        assert_eq!(controller.state(), state(ViewMode::Menu, ProgressionView));
    }

    /// Progression -> detail -> back lands on the progression menu
    #[test]
    fn test_return_restores_context() {
        let mut controller = ViewContextController::new();
        controller.enter_menu_context(ProgressionView);
        controller.navigate_to(ViewMode::Detail);
        assert_eq!(controller.menu_presentation(), None);
        controller.return_to_menu();
        assert_eq!(controller.state(), state(ViewMode::Menu, ProgressionView));
        assert_eq!(controller.menu_presentation(), Some(ProgressionView));
    }

    #[test]
    fn test_return_from_fresh() {
        let mut controller = ViewContextController::new();
        controller.return_to_menu();
        assert_eq!(controller.state(), state(ViewMode::Menu, ListView));
    }

    #[test]
    fn test_last_enter_wins() {
        let mut controller = ViewContextController::new();
        controller.enter_menu_context(ListView);
        controller.enter_menu_context(ProgressionView);
        assert_eq!(controller.state().previous_menu_context, ProgressionView);
    }

    #[test]
    fn test_enter_from_detail() {
        let mut controller = ViewContextController::new();
        controller.navigate_to(ViewMode::Detail);
        controller.enter_menu_context(ProgressionView);
        assert_eq!(controller.state(), state(ViewMode::Menu, ProgressionView));
    }

    #[test]
    fn test_navigate_to_menu_keeps_context() {
        let mut controller =
            ViewContextController::with_default(ProgressionView);
        controller.navigate_to(ViewMode::Detail);
        controller.navigate_to(ViewMode::Menu);
        assert_eq!(controller.state(), state(ViewMode::Menu, ProgressionView));
    }

    #[test]
    fn test_invalid_view() {
        let mut controller = ViewContextController::new();
        controller.enter_menu_context(ProgressionView);
        let before = controller.state();
        assert_eq!(
            controller.try_navigate_to("Unknown"),
            Err(NavigationError::InvalidViewMode("Unknown".into()))
        );
        assert_eq!(controller.state(), before);
    }

    #[test]
    fn test_invalid_presentation_mode() {
        let mut controller = ViewContextController::new();
        controller.navigate_to(ViewMode::Detail);
        let before = controller.state();
        assert_eq!(
            controller.try_enter_menu_context("carousel"),
            Err(NavigationError::InvalidPresentationMode("carousel".into()))
        );
        assert_eq!(controller.state(), before);
    }

    #[test]
    fn test_try_variants() {
        let mut controller = ViewContextController::new();
        controller.try_enter_menu_context("progression").unwrap();
        controller.try_navigate_to("detail").unwrap();
        assert_eq!(
            controller.state(),
            state(ViewMode::Detail, ProgressionView)
        );
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Action {
        Navigate(ViewMode),
        Enter(MenuPresentationMode),
        Return,
    }

    fn view_mode_strategy() -> impl Strategy<Value = ViewMode> {
        prop_oneof![Just(ViewMode::Menu), Just(ViewMode::Detail)]
    }

    fn presentation_mode_strategy(
    ) -> impl Strategy<Value = MenuPresentationMode> {
        prop_oneof![
            Just(MenuPresentationMode::ListView),
            Just(MenuPresentationMode::ProgressionView),
        ]
    }

    fn action_strategy() -> impl Strategy<Value = Action> {
        prop_oneof![
            view_mode_strategy().prop_map(Action::Navigate),
            presentation_mode_strategy().prop_map(Action::Enter),
            Just(Action::Return),
        ]
    }

    fn apply(controller: &mut ViewContextController, action: &Action) {
        match action {
            Action::Navigate(view) => controller.navigate_to(*view),
            Action::Enter(mode) => controller.enter_menu_context(*mode),
            Action::Return => controller.return_to_menu(),
        }
    }

    proptest! {
        /// Property: any number of detours through detail, then return,
        /// restores the mode the menu was entered in.
        #[test]
        fn context_preserved_across_detours(
            prefix in prop::collection::vec(action_strategy(), 0..10),
            mode in presentation_mode_strategy(),
            detours in 0usize..10,
        ) {
            let mut controller = ViewContextController::new();
            for action in &prefix {
                apply(&mut controller, action);
            }
            controller.enter_menu_context(mode);
            for _ in 0..detours {
                controller.navigate_to(ViewMode::Detail);
            }
            controller.return_to_menu();

            prop_assert_eq!(controller.state().current_view, ViewMode::Menu);
            prop_assert_eq!(controller.state().previous_menu_context, mode);
        }

        /// Property: navigate_to never touches the menu context.
        #[test]
        fn navigate_never_changes_context(
            prefix in prop::collection::vec(action_strategy(), 0..10),
            view in view_mode_strategy(),
        ) {
            let mut controller = ViewContextController::new();
            for action in &prefix {
                apply(&mut controller, action);
            }
            let before = controller.state().previous_menu_context;
            controller.navigate_to(view);

            prop_assert_eq!(controller.state().current_view, view);
            prop_assert_eq!(controller.state().previous_menu_context, before);
        }

        /// Property: return_to_menu twice is the same as once.
        #[test]
        fn return_is_idempotent(
            prefix in prop::collection::vec(action_strategy(), 0..10),
        ) {
            let mut controller = ViewContextController::new();
            for action in &prefix {
                apply(&mut controller, action);
            }
            controller.return_to_menu();
            let once = controller.state();
            controller.return_to_menu();

            prop_assert_eq!(controller.state(), once);
        }
    }
}
