use crate::command::{Command, Direction};
use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::events::{Action, Binding, EventBindings, Namespace};
use crate::markup::{build_view, mark_active};
use crate::state::{CarouselState, InstanceId};
use crate::timers::{Millis, TimerQueue};
use html::{Document, Id};
use serde_json::Value;
use std::collections::HashMap;

/// Owns every carousel attached to one document, their click bindings and
/// their auto-rotate timers.
///
/// Instance state lives in an arena indexed by [`InstanceId`]; containers map
/// to instances through `by_container`. Slots of forgotten instances stay
/// empty so ids are never reused.
#[derive(Debug, Default)]
pub struct CarouselController {
    instances: Vec<Option<CarouselState>>,
    by_container: HashMap<Id, InstanceId>,
    bindings: EventBindings,
    timers: TimerQueue<InstanceId>,
}

impl CarouselController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a carousel to `container`.
    ///
    /// A container that already carries a carousel is left untouched and its
    /// existing instance is returned, whatever `config` holds.
    pub fn initialize(
        &mut self,
        doc: &mut Document,
        container: Id,
        config: &CarouselConfig,
    ) -> Result<InstanceId, CarouselError> {
        if let Some(&existing) = self.by_container.get(&container) {
            log::debug!(
                "streamrotate: container {} already initialized as {:?}",
                container.0,
                existing
            );
            return Ok(existing);
        }
        let settings = config.validate()?;
        if !doc.is_element(container) {
            return Err(CarouselError::UnknownContainer(container));
        }

        let items = settings.selector.query_all(doc, container);
        let parts = build_view(doc, container, items, settings.height)?;

        let id = InstanceId(self.instances.len() as u32 + 1);
        log::debug!(
            "streamrotate: {:?} attached to container {} with {} items (selector {:?}, autoRotateSpeed {})",
            id,
            container.0,
            parts.items.len(),
            settings.selector_source,
            settings.auto_rotate_speed
        );
        self.instances.push(Some(CarouselState {
            id,
            position: 0,
            settings,
            timer: None,
            parts,
        }));
        self.by_container.insert(container, id);

        self.init_auto_rotate(id);
        self.bind_events(id);
        Ok(id)
    }

    /// Attach independently to each container. The configuration is checked
    /// once up front, so a bad config leaves every container untouched.
    pub fn initialize_all(
        &mut self,
        doc: &mut Document,
        containers: &[Id],
        config: &CarouselConfig,
    ) -> Result<Vec<InstanceId>, CarouselError> {
        if containers.is_empty() {
            return Ok(Vec::new());
        }
        if containers.iter().any(|c| !self.by_container.contains_key(c)) {
            config.validate()?;
            if let Some(&missing) = containers
                .iter()
                .find(|c| !self.by_container.contains_key(*c) && !doc.is_element(**c))
            {
                return Err(CarouselError::UnknownContainer(missing));
            }
        }
        containers
            .iter()
            .map(|&container| self.initialize(doc, container, config))
            .collect()
    }

    /// Step one item forward or backward, wrapping at both ends.
    /// Returns the new position.
    pub fn navigate(
        &mut self,
        doc: &mut Document,
        container: Id,
        direction: Direction,
    ) -> Result<usize, CarouselError> {
        let id = self.instance_for(container)?;
        self.navigate_instance(doc, id, direction)
    }

    /// Make item `pos` the active one and restart the auto-rotate countdown.
    pub fn display(
        &mut self,
        doc: &mut Document,
        container: Id,
        pos: usize,
    ) -> Result<(), CarouselError> {
        let id = self.instance_for(container)?;
        self.display_instance(doc, id, pos)
    }

    /// Execute a command against a container.
    pub fn run(
        &mut self,
        doc: &mut Document,
        container: Id,
        command: Command,
    ) -> Result<InstanceId, CarouselError> {
        match command {
            Command::Init(config) => self.initialize(doc, container, &config),
            Command::Navigate(direction) => {
                self.navigate(doc, container, direction)?;
                self.instance_for(container)
            }
            Command::Display(pos) => {
                self.display(doc, container, pos)?;
                self.instance_for(container)
            }
        }
    }

    /// Entry point in the "options or method name" calling convention,
    /// applied to every container in `containers`.
    pub fn invoke(
        &mut self,
        doc: &mut Document,
        containers: &[Id],
        method_or_options: &Value,
        args: &Value,
    ) -> Result<Vec<InstanceId>, CarouselError> {
        match Command::parse(method_or_options, args)? {
            Command::Init(config) => self.initialize_all(doc, containers, &config),
            command => containers
                .iter()
                .map(|&container| self.run(doc, container, command.clone()))
                .collect(),
        }
    }

    /// Deliver a click on `target`. Returns `true` if a carousel handled it.
    pub fn click(&mut self, doc: &mut Document, target: Id) -> Result<bool, CarouselError> {
        let Some(binding) = self.bindings.resolve(doc, target) else {
            return Ok(false);
        };
        log::trace!(
            "streamrotate: click on {} -> {:?} for {:?}",
            target.0,
            binding.action,
            binding.instance
        );
        match binding.action {
            Action::Navigate(direction) => {
                self.navigate_instance(doc, binding.instance, direction)?;
            }
            Action::Display(pos) => self.display_instance(doc, binding.instance, pos)?,
        }
        Ok(true)
    }

    /// Move the clock forward by `elapsed` ms, firing due auto-rotate ticks in
    /// order. Returns the number of ticks fired.
    ///
    /// Instances whose container has left the document are dropped instead
    /// of ticked.
    pub fn advance(&mut self, doc: &mut Document, elapsed: Millis) -> Result<usize, CarouselError> {
        let deadline = self.timers.now().saturating_add(elapsed);
        let mut fired = 0;
        while let Some((timer, id)) = self.timers.pop_due(deadline) {
            let Some(container) = self.state(id).map(CarouselState::container) else {
                self.timers.clear_interval(timer);
                continue;
            };
            if !doc.contains(container) {
                self.forget(container);
                continue;
            }
            log::trace!("streamrotate: {timer} tick for {id:?} at {}ms", self.timers.now());
            self.navigate_instance(doc, id, Direction::Forward)?;
            fired += 1;
        }
        self.timers.settle(deadline);
        Ok(fired)
    }

    /// Drop the carousel attached to `container`, cancelling its timer and
    /// handlers. The generated markup is left in place.
    pub fn forget(&mut self, container: Id) -> bool {
        let Some(id) = self.by_container.remove(&container) else {
            return false;
        };
        if let Some(state) = self.slot_mut(id).and_then(Option::take)
            && let Some(timer) = state.timer
        {
            self.timers.clear_interval(timer);
        }
        self.bindings.unbind_instance(id);
        log::debug!("streamrotate: {id:?} detached from container {}", container.0);
        true
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn is_initialized(&self, container: Id) -> bool {
        self.by_container.contains_key(&container)
    }

    pub fn get(&self, container: Id) -> Option<&CarouselState> {
        self.by_container.get(&container).and_then(|&id| self.state(id))
    }

    pub fn state(&self, id: InstanceId) -> Option<&CarouselState> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.instances.get(index)?.as_ref()
    }

    /// Attached instances, in attach order.
    pub fn instances(&self) -> impl Iterator<Item = &CarouselState> {
        self.instances.iter().flatten()
    }

    /// Armed auto-rotate timers across all instances.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn bound_handlers(&self) -> usize {
        self.bindings.len()
    }

    fn slot_mut(&mut self, id: InstanceId) -> Option<&mut Option<CarouselState>> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.instances.get_mut(index)
    }

    fn state_mut(&mut self, id: InstanceId) -> Option<&mut CarouselState> {
        self.slot_mut(id)?.as_mut()
    }

    fn instance_for(&self, container: Id) -> Result<InstanceId, CarouselError> {
        self.by_container
            .get(&container)
            .copied()
            .ok_or(CarouselError::NotInitialized(container))
    }

    fn navigate_instance(
        &mut self,
        doc: &mut Document,
        id: InstanceId,
        direction: Direction,
    ) -> Result<usize, CarouselError> {
        let state = self
            .state(id)
            .ok_or(CarouselError::NotInitialized(Id::INVALID))?;
        if state.item_count() == 0 {
            return Ok(0);
        }
        let pos = state.step(direction);
        log::trace!("streamrotate: {id:?} {direction:?} {} -> {pos}", state.position);
        self.display_instance(doc, id, pos)?;
        Ok(pos)
    }

    fn display_instance(
        &mut self,
        doc: &mut Document,
        id: InstanceId,
        pos: usize,
    ) -> Result<(), CarouselError> {
        let state = self
            .state_mut(id)
            .ok_or(CarouselError::NotInitialized(Id::INVALID))?;
        let item_count = state.item_count();
        if pos >= item_count {
            return Err(CarouselError::PositionOutOfRange {
                position: pos,
                item_count,
            });
        }
        mark_active(doc, &state.parts, pos)?;
        state.position = pos;
        self.init_auto_rotate(id);
        Ok(())
    }

    /// (Re)arm the auto-rotate timer. Any previous timer is cancelled first;
    /// with a speed of 0 nothing is armed.
    fn init_auto_rotate(&mut self, id: InstanceId) {
        let Some(state) = self.state(id) else {
            return;
        };
        let speed = state.settings.auto_rotate_speed;
        if speed == 0 {
            return;
        }
        if let Some(previous) = state.timer {
            self.timers.clear_interval(previous);
        }
        let timer = self.timers.set_interval(speed, id);
        if let Some(state) = self.state_mut(id) {
            state.timer = Some(timer);
        }
        log::trace!("streamrotate: {id:?} armed {timer} every {speed}ms");
    }

    fn bind_events(&mut self, id: InstanceId) {
        let Some(state) = self.state(id) else {
            return;
        };
        let parts = state.parts.clone();
        let bind = |action| Binding {
            instance: id,
            action,
        };
        self.bindings.bind(
            parts.nav_right,
            Namespace::NavRight,
            bind(Action::Navigate(Direction::Forward)),
        );
        self.bindings.bind(
            parts.nav_left,
            Namespace::NavLeft,
            bind(Action::Navigate(Direction::Backward)),
        );
        for (index, dot) in parts.dots.into_iter().enumerate() {
            self.bindings.bind(dot, Namespace::Goto, bind(Action::Display(index)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use html::build::{doc, elem, text};

    // #document(1) > div#host(2) > [li.slide(3) "a"(4), li.slide(5) "b"(6), li.slide(7) "c"(8)]
    fn fixture(count: usize) -> (Document, Id) {
        let slides = (0..count)
            .map(|i| elem("li", &[("class", "slide")], vec![text(&i.to_string())]))
            .collect();
        let dom = Document::from_node(&doc(vec![elem("div", &[("id", "host")], slides)]));
        (dom, Id(2))
    }

    #[test]
    fn instance_ids_are_assigned_in_order() {
        let (mut dom, host) = fixture(2);
        let other = dom.create_element("div", None);
        dom.append_child(dom.root(), other).unwrap();
        let mut ctl = CarouselController::new();
        let config = CarouselConfig::new(".slide");
        assert_eq!(ctl.initialize(&mut dom, host, &config), Ok(InstanceId(1)));
        assert_eq!(ctl.initialize(&mut dom, other, &config), Ok(InstanceId(2)));
        assert_eq!(ctl.get(other).map(CarouselState::item_count), Some(0));
    }

    #[test]
    fn step_wraps_backwards_from_zero() {
        let (mut dom, host) = fixture(3);
        let mut ctl = CarouselController::new();
        ctl.initialize(&mut dom, host, &CarouselConfig::new(".slide"))
            .unwrap();
        assert_eq!(ctl.navigate(&mut dom, host, Direction::Backward), Ok(2));
        assert_eq!(ctl.navigate(&mut dom, host, Direction::Forward), Ok(0));
    }

    #[test]
    fn unknown_container_is_rejected() {
        let (mut dom, _) = fixture(1);
        let mut ctl = CarouselController::new();
        let config = CarouselConfig::new(".slide");
        assert_eq!(
            ctl.initialize(&mut dom, Id(4), &config),
            Err(CarouselError::UnknownContainer(Id(4)))
        );
        assert_eq!(
            ctl.initialize(&mut dom, Id(99), &config),
            Err(CarouselError::UnknownContainer(Id(99)))
        );
    }

    #[test]
    fn config_errors_take_precedence_over_container_errors() {
        let (mut dom, _) = fixture(1);
        let mut ctl = CarouselController::new();
        assert_eq!(
            ctl.initialize(&mut dom, Id(99), &CarouselConfig::default()),
            Err(CarouselError::Config(ConfigError::MissingSelector))
        );
    }

    #[test]
    fn commands_need_an_initialized_container() {
        let (mut dom, host) = fixture(1);
        let mut ctl = CarouselController::new();
        assert_eq!(
            ctl.run(&mut dom, host, Command::Navigate(Direction::Forward)),
            Err(CarouselError::NotInitialized(host))
        );
    }

    #[test]
    fn forget_cancels_timer_and_handlers() {
        let (mut dom, host) = fixture(2);
        let mut ctl = CarouselController::new();
        ctl.initialize(
            &mut dom,
            host,
            &CarouselConfig::new(".slide").with_auto_rotate_speed(50),
        )
        .unwrap();
        assert_eq!(ctl.active_timers(), 1);
        assert_eq!(ctl.bound_handlers(), 4);
        assert!(ctl.forget(host));
        assert!(!ctl.forget(host));
        assert_eq!(ctl.active_timers(), 0);
        assert_eq!(ctl.bound_handlers(), 0);
        assert!(ctl.instances().next().is_none());
        assert!(ctl.state(InstanceId(1)).is_none());
    }

    #[test]
    fn ticks_stop_once_container_is_removed() {
        let (mut dom, host) = fixture(2);
        let mut ctl = CarouselController::new();
        ctl.initialize(
            &mut dom,
            host,
            &CarouselConfig::new(".slide").with_auto_rotate_speed(10),
        )
        .unwrap();
        dom.remove_subtree(host).unwrap();
        assert_eq!(ctl.advance(&mut dom, 100), Ok(0));
        assert!(!ctl.is_initialized(host));
        assert_eq!(ctl.active_timers(), 0);
        assert_eq!(ctl.now(), 100);
    }

    #[test]
    fn advance_to_end_of_clock_terminates() {
        let (mut dom, host) = fixture(3);
        let mut ctl = CarouselController::new();
        ctl.initialize(
            &mut dom,
            host,
            &CarouselConfig::new(".slide").with_auto_rotate_speed(Millis::MAX),
        )
        .unwrap();
        assert_eq!(ctl.advance(&mut dom, Millis::MAX), Ok(1));
        assert_eq!(ctl.get(host).map(CarouselState::position), Some(1));
        assert_eq!(ctl.active_timers(), 0);
        assert_eq!(ctl.advance(&mut dom, Millis::MAX), Ok(0));
    }
}
