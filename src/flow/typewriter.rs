//! Character-by-character text reveal followed by a hold

/// Where the reveal currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    Typing,
    Holding,
    Finished,
}

/// Reveals `message` one character every `type_speed` seconds, then holds
/// for `pause` seconds. The first character shows immediately.
#[derive(Debug, Clone)]
pub struct Typewriter {
    message: String,
    char_count: usize,
    type_speed: f32,
    pause: f32,
    elapsed: f32,
}

impl Typewriter {
    pub fn new(message: &str, type_speed: f32, pause: f32) -> Self {
        Self {
            message: message.to_string(),
            char_count: message.chars().count(),
            type_speed: type_speed.max(0.0),
            pause: pause.max(0.0),
            elapsed: 0.0,
        }
    }

    fn typing_duration(&self) -> f32 {
        self.char_count as f32 * self.type_speed
    }

    pub fn tick(&mut self, dt: f32) -> TypewriterPhase {
        self.elapsed += dt;
        self.phase()
    }

    pub fn phase(&self) -> TypewriterPhase {
        let typing = self.typing_duration();
        if self.elapsed < typing {
            TypewriterPhase::Typing
        } else if self.elapsed < typing + self.pause {
            TypewriterPhase::Holding
        } else {
            TypewriterPhase::Finished
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == TypewriterPhase::Finished
    }

    /// Number of characters currently revealed
    pub fn visible_chars(&self) -> usize {
        if self.type_speed <= 0.0 {
            return self.char_count;
        }
        let typed = (self.elapsed / self.type_speed).floor() as usize + 1;
        typed.min(self.char_count)
    }

    /// Revealed prefix of the message
    pub fn visible_text(&self) -> &str {
        let visible = self.visible_chars();
        match self.message.char_indices().nth(visible) {
            Some((byte_index, _)) => &self.message[..byte_index],
            None => &self.message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_timing() {
        let mut tw = Typewriter::new("Draft", 0.1, 0.5);
        assert_eq!(tw.visible_text(), "D");
        assert_eq!(tw.phase(), TypewriterPhase::Typing);

        tw.tick(0.25);
        assert_eq!(tw.visible_text(), "Dra");

        tw.tick(0.3);
        assert_eq!(tw.visible_text(), "Draft");
        assert_eq!(tw.phase(), TypewriterPhase::Holding);

        tw.tick(0.5);
        assert!(tw.is_finished());
    }

    #[test]
    fn test_multibyte_characters_are_counted_once() {
        let mut tw = Typewriter::new("¡Olé!", 1.0, 0.0);
        tw.tick(1.5);
        assert_eq!(tw.visible_chars(), 2);
        assert_eq!(tw.visible_text(), "¡O");
    }

    #[test]
    fn test_empty_message_only_holds() {
        let mut tw = Typewriter::new("", 0.05, 0.5);
        assert_eq!(tw.visible_text(), "");
        assert_eq!(tw.phase(), TypewriterPhase::Holding);
        tw.tick(0.5);
        assert!(tw.is_finished());
    }

    #[test]
    fn test_zero_speed_reveals_everything() {
        let tw = Typewriter::new("Instant", 0.0, 0.0);
        assert_eq!(tw.visible_text(), "Instant");
        assert!(tw.is_finished());
    }
}
