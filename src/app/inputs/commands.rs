use crate::app::events::LensEvent;
use crate::app::inputs::gesture::Gesture;
use crate::host::Scene;
use crate::screen::ScreenId;
use anyhow::{anyhow, bail, Result};
use std::time::Duration;

#[derive(Debug)]
pub enum Command {
    Event(LensEvent),
    /// Pause the input stream, letting animations and captions play out.
    Wait(Duration),
}

/// Parse one line of the demo's stdin protocol: `swipe <x> <y>`,
/// `tap <node-name>`, `wait <ms>` or `quit`. Blank lines and `#` comments
/// yield `None`. Swipes are stamped with `origin`, the screen current at
/// the time the line was read.
pub fn parse_command(line: &str, scene: &dyn Scene, origin: ScreenId) -> Result<Option<Command>> {
    let line = line.trim();
    if line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };

    let command = match verb {
        "swipe" => {
            let x = parse_axis(parts.next(), "x")?;
            let y = parse_axis(parts.next(), "y")?;
            Command::Event(LensEvent::Swipe {
                gesture: Gesture::swipe(x, y),
                origin,
            })
        }
        "tap" => {
            let name = parts.next().ok_or_else(|| anyhow!("tap needs a node name"))?;
            let node = scene
                .find_first(name)
                .ok_or_else(|| anyhow!("no node named {:?}", name))?;
            Command::Event(LensEvent::Tap(node))
        }
        "wait" => {
            let token = parts.next().ok_or_else(|| anyhow!("wait needs milliseconds"))?;
            let ms: u64 = token
                .parse()
                .map_err(|_| anyhow!("not a duration in ms: {:?}", token))?;
            Command::Wait(Duration::from_millis(ms))
        }
        "quit" | "exit" => Command::Event(LensEvent::Quit),
        other => bail!("unknown command {:?}", other),
    };

    if parts.next().is_some() {
        bail!("trailing arguments after {:?}", verb);
    }
    Ok(Some(command))
}

fn parse_axis(token: Option<&str>, axis: &str) -> Result<f32> {
    let token = token.ok_or_else(|| anyhow!("swipe needs {}", axis))?;
    let value: f32 = token
        .parse()
        .map_err(|_| anyhow!("{} is not a number: {:?}", axis, token))?;
    if !value.is_finite() {
        bail!("{} must be finite", axis);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessScene;

    #[test]
    fn test_parse_swipe_and_tap() {
        let scene = HeadlessScene::with_lens_nodes(390.0);
        match parse_command("swipe -0.6 0", &scene, ScreenId::Settings).unwrap() {
            Some(Command::Event(LensEvent::Swipe { gesture, origin })) => {
                assert_eq!(gesture, Gesture::swipe(-0.6, 0.0));
                assert_eq!(origin, ScreenId::Settings);
            }
            other => panic!("unexpected {:?}", other),
        }
        match parse_command("tap start-button", &scene, ScreenId::Settings).unwrap() {
            Some(Command::Event(LensEvent::Tap(node))) => {
                assert_eq!(Some(node), scene.node_id("start-button"))
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            parse_command("quit", &scene, ScreenId::Settings).unwrap(),
            Some(Command::Event(LensEvent::Quit))
        ));
        assert!(matches!(
            parse_command("wait 350", &scene, ScreenId::Settings).unwrap(),
            Some(Command::Wait(d)) if d == Duration::from_millis(350)
        ));
        assert!(parse_command("   ", &scene, ScreenId::Settings).unwrap().is_none());
        assert!(parse_command("# comment", &scene, ScreenId::Settings).unwrap().is_none());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let scene = HeadlessScene::with_lens_nodes(390.0);
        assert!(parse_command("swipe 0.6", &scene, ScreenId::Settings).is_err());
        assert!(parse_command("swipe a b", &scene, ScreenId::Settings).is_err());
        assert!(parse_command("swipe NaN 0", &scene, ScreenId::Settings).is_err());
        assert!(parse_command("tap nowhere", &scene, ScreenId::Settings).is_err());
        assert!(parse_command("dance", &scene, ScreenId::Settings).is_err());
        assert!(parse_command("wait soon", &scene, ScreenId::Settings).is_err());
        assert!(parse_command("quit now", &scene, ScreenId::Settings).is_err());
    }
}
