// Well-known composition paths - must match the receiver's OSC input map.

/// Argument value that selects/connects a target.
pub const CONNECT: i32 = 1;
/// Transport play direction: 0 = backwards, 1 = paused, 2 = forwards.
pub const PLAY_FORWARD: i32 = 2;

/// `/composition/columns/{n}/connect` - select playback column `n`.
pub fn column_connect(column: u32) -> String {
    format!("/composition/columns/{}/connect", column)
}

/// `/composition/columns/{n}/disconnect`.
pub fn column_disconnect(column: u32) -> String {
    format!("/composition/columns/{}/disconnect", column)
}

/// `/composition/layers/{l}/clips/{c}/select`.
pub fn clip_select(layer: u32, clip: u32) -> String {
    format!("/composition/layers/{}/clips/{}/select", layer, clip)
}

/// `/composition/layers/{l}/clips/{c}/connect`.
pub fn clip_connect(layer: u32, clip: u32) -> String {
    format!("/composition/layers/{}/clips/{}/connect", layer, clip)
}

/// Per-clip transport direction path.
pub fn clip_play_direction(layer: u32, clip: u32) -> String {
    format!(
        "/composition/layers/{}/clips/{}/transport/position/behaviour/playdirection",
        layer, clip
    )
}

/// Transport direction of whichever clip is currently selected.
pub fn selected_clip_play_direction() -> String {
    "/composition/selectedclip/transport/position/behaviour/playdirection".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_paths() {
        assert_eq!(column_connect(1), "/composition/columns/1/connect");
        assert_eq!(column_disconnect(12), "/composition/columns/12/disconnect");
    }

    #[test]
    fn clip_paths() {
        assert_eq!(clip_select(1, 1), "/composition/layers/1/clips/1/select");
        assert_eq!(
            clip_play_direction(2, 3),
            "/composition/layers/2/clips/3/transport/position/behaviour/playdirection"
        );
    }
}
