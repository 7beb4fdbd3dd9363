//! 专注模式与快捷键

use crate::exercise::Exercise;

/// 键盘命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Focus(Exercise),
    ClearFocus,
    ToggleDebug,
}

/// 1-4 选择专注动作，0 取消，d/D 切换调试输出
pub fn key_command(key: char) -> Option<KeyCommand> {
    match key {
        '0' => Some(KeyCommand::ClearFocus),
        'd' | 'D' => Some(KeyCommand::ToggleDebug),
        _ => Exercise::ALL
            .into_iter()
            .find(|exercise| shortcut(*exercise) == Some(key))
            .map(KeyCommand::Focus),
    }
}

pub fn shortcut(exercise: Exercise) -> Option<char> {
    match exercise {
        Exercise::Squat => Some('1'),
        Exercise::PushUp => Some('2'),
        Exercise::BicepCurl => Some('3'),
        Exercise::Plank => Some('4'),
        _ => None,
    }
}

/// 解析外部传入的专注目标，无法识别或不可专注时为 `None`
pub fn parse_focus(raw: Option<&str>) -> Option<Exercise> {
    raw.and_then(|name| name.parse::<Exercise>().ok())
        .filter(|exercise| exercise.is_focusable())
}

pub fn searching_message(target: Exercise) -> String {
    format!("Looking for {target} exercise...")
}
