use gl::types::*;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};
use std::sync::Mutex;

/// Un message de debug répété n'est relogué que toutes les N occurrences.
const DEBUG_MESSAGE_REPEAT: u32 = 300;

lazy_static::lazy_static! {
    static ref DEBUG_MESSAGE_COUNTS: Mutex<HashMap<GLuint, u32>> = Mutex::new(HashMap::new());
}

unsafe fn gl_string(name: GLenum) -> String {
    let ptr = gl::GetString(name);
    if ptr.is_null() {
        return "Unknown".to_string();
    }
    CStr::from_ptr(ptr as *const c_char)
        .to_string_lossy()
        .into_owned()
}

/// Affiche les informations OpenGL / GPU du contexte courant.
///
/// # Safety
/// Le contexte OpenGL doit être valide et courant sur ce thread.
pub unsafe fn show_opengl_context_info() {
    info!("🖥 OpenGL context info:");
    info!("  Vendor   : {}", gl_string(gl::VENDOR));
    info!("  Renderer : {}", gl_string(gl::RENDERER));
    info!("  OpenGL   : {}", gl_string(gl::VERSION));
    info!("  GLSL     : {}", gl_string(gl::SHADING_LANGUAGE_VERSION));

    let mut max_texture_size = 0;
    gl::GetIntegerv(gl::MAX_TEXTURE_SIZE, &mut max_texture_size);
    let mut num_ext = 0;
    gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_ext);
    info!(
        "  Limits   : max texture {} px, {} extensions",
        max_texture_size, num_ext
    );

    let extensions: Vec<String> = (0..num_ext.max(0) as GLuint)
        .filter_map(|i| {
            let ptr = gl::GetStringi(gl::EXTENSIONS, i);
            (!ptr.is_null()).then(|| {
                CStr::from_ptr(ptr as *const c_char)
                    .to_string_lossy()
                    .into_owned()
            })
        })
        .collect();
    debug!("GL_EXTENSIONS = {}", extensions.join(" "));

    let err = gl::GetError();
    if err != gl::NO_ERROR {
        warn!("glerror consumed after getting context info: 0x{:X}", err);
    }
}

fn debug_source_name(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        gl::DEBUG_SOURCE_APPLICATION => "Application",
        gl::DEBUG_SOURCE_OTHER => "Other",
        _ => "Unknown",
    }
}

fn debug_type_name(type_: GLenum) -> &'static str {
    match type_ {
        gl::DEBUG_TYPE_ERROR => "Error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        gl::DEBUG_TYPE_PORTABILITY => "Portability",
        gl::DEBUG_TYPE_PERFORMANCE => "Performance",
        gl::DEBUG_TYPE_OTHER => "Other",
        _ => "Unknown",
    }
}

/// Compte une occurrence du message `id` ; vrai s'il doit être logué.
fn should_log_debug_message(id: GLuint) -> bool {
    let Ok(mut counts) = DEBUG_MESSAGE_COUNTS.lock() else {
        return true;
    };
    let count = counts.entry(id).or_insert(0);
    *count += 1;
    *count == 1 || *count % DEBUG_MESSAGE_REPEAT == 0
}

extern "system" fn gl_debug_callback(
    source: GLenum,
    type_: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    if severity == gl::DEBUG_SEVERITY_NOTIFICATION || message.is_null() {
        return;
    }
    if !should_log_debug_message(id) {
        return;
    }

    let msg = unsafe { CStr::from_ptr(message).to_string_lossy() };
    let line = format!(
        "[OpenGL Debug] id: {:X}, source: {}, type: {}, message: {}",
        id,
        debug_source_name(source),
        debug_type_name(type_),
        msg
    );
    match severity {
        gl::DEBUG_SEVERITY_HIGH => warn!("🔴 {}", line),
        gl::DEBUG_SEVERITY_MEDIUM => warn!("🟠 {}", line),
        _ => debug!("{}", line),
    }
}

/// Branche `glDebugMessageCallback` si le contexte l'expose (GL 4.3 / KHR_debug).
///
/// # Safety
/// Le contexte OpenGL doit être valide et courant sur ce thread.
pub unsafe fn setup_opengl_debug() {
    if !gl::DebugMessageCallback::is_loaded() {
        info!("ℹ️ glDebugMessageCallback unavailable, GL debug output disabled");
        return;
    }

    gl::Enable(gl::DEBUG_OUTPUT);
    gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
    gl::DebugMessageCallback(Some(gl_debug_callback), std::ptr::null());
    gl::DebugMessageControl(
        gl::DONT_CARE,
        gl::DONT_CARE,
        gl::DONT_CARE,
        0,
        std::ptr::null(),
        gl::TRUE,
    );
    info!("🐞 OpenGL debug output enabled");
}

/// Taille en octets lisible (bytes, KB, MB, GB).
pub fn format_bytes(size: isize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let size_f64 = size as f64;

    if size_f64 >= GB {
        format!("{:.3} GB", size_f64 / GB)
    } else if size_f64 >= MB {
        format!("{:.3} MB", size_f64 / MB)
    } else if size_f64 >= KB {
        format!("{:.3} KB", size_f64 / KB)
    } else {
        format!("{} bytes", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 bytes");
        assert_eq!(format_bytes(1023), "1023 bytes");
        assert_eq!(format_bytes(1024), "1.000 KB");
        // 1000 bullets : 80 000 octets envoyés par frame
        assert_eq!(format_bytes(80_000), "78.125 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.000 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.000 GB");
    }

    #[test]
    fn test_debug_messages_are_throttled() {
        let id = 0xB0_11E7;
        assert!(should_log_debug_message(id));
        for _ in 2..DEBUG_MESSAGE_REPEAT {
            assert!(!should_log_debug_message(id));
        }
        assert!(should_log_debug_message(id));
    }
}
