use gl::types::*;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use std::{ffi::CString, fs, path::Path, ptr};

use crate::renderer_engine::error::{RendererError, Result};

pub const BULLET_VERTEX_SHADER_PATH: &str = "assets/shaders/bullet.vert";
pub const BULLET_FRAGMENT_SHADER_PATH: &str = "assets/shaders/bullet.frag";

/// Copies embarquées des shaders, utilisées si les fichiers sont absents.
pub const BULLET_VERTEX_SHADER_SRC: &str = include_str!("../../assets/shaders/bullet.vert");
pub const BULLET_FRAGMENT_SHADER_SRC: &str = include_str!("../../assets/shaders/bullet.frag");

lazy_static! {
    /// Formats de logs GLSL connus, le groupe `line` contient le numéro de ligne :
    /// - "0:12(105): ..." (Mesa/Intel)
    /// - "0(12) : error ..." (NVIDIA)
    /// - "ERROR: 0:12: ..." (AMD/ATI)
    static ref GLSL_ERROR_PATTERNS: [Regex; 3] = [
        Regex::new(r"\d+:(?P<line>\d+)\(\d+\)").unwrap(),
        Regex::new(r"\d+\((?P<line>\d+)\)\s*:").unwrap(),
        Regex::new(r":\s*\d+:(?P<line>\d+):").unwrap(),
    ];
}

/// Lit les sources vertex/fragment depuis le disque.
pub fn load_shader_sources<P: AsRef<Path>>(
    vertex_path: P,
    fragment_path: P,
) -> Result<(String, String)> {
    let read = |path: &Path| {
        fs::read_to_string(path).map_err(|source| RendererError::Io {
            path: path.display().to_string(),
            source,
        })
    };
    Ok((read(vertex_path.as_ref())?, read(fragment_path.as_ref())?))
}

/// Sources lues depuis le disque, ou les copies `embedded` si un fichier manque.
pub fn shader_sources_or_embedded(
    vertex_path: &str,
    fragment_path: &str,
    embedded: (&str, &str),
) -> (String, String) {
    match load_shader_sources(vertex_path, fragment_path) {
        Ok(sources) => sources,
        Err(e) => {
            warn!("⚠️ {}, using embedded shaders", e);
            (embedded.0.to_owned(), embedded.1.to_owned())
        }
    }
}

/// Sources des shaders de bullets : fichiers d'`assets/` si présents,
/// sinon les copies embarquées dans le binaire.
pub fn bullet_shader_sources() -> (String, String) {
    shader_sources_or_embedded(
        BULLET_VERTEX_SHADER_PATH,
        BULLET_FRAGMENT_SHADER_PATH,
        (BULLET_VERTEX_SHADER_SRC, BULLET_FRAGMENT_SHADER_SRC),
    )
}

/// Programme GLSL lié. Le programme GPU est détruit au `drop`.
#[derive(Debug)]
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    /// Compile et lie un programme vertex + fragment.
    ///
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn from_sources(vertex_src: &str, fragment_src: &str) -> Result<Self> {
        let vs = compile_shader(vertex_src, gl::VERTEX_SHADER)?;
        let fs = match compile_shader(fragment_src, gl::FRAGMENT_SHADER) {
            Ok(fs) => fs,
            Err(e) => {
                gl::DeleteShader(vs);
                return Err(e);
            }
        };

        let id = gl::CreateProgram();
        gl::AttachShader(id, vs);
        gl::AttachShader(id, fs);
        gl::LinkProgram(id);

        // Les objets shader ne sont plus utiles une fois le programme lié
        gl::DeleteShader(vs);
        gl::DeleteShader(fs);

        let mut success = gl::FALSE as GLint;
        gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
        if success != gl::TRUE as GLint {
            let log = info_log(id, gl::GetProgramiv, gl::GetProgramInfoLog);
            gl::DeleteProgram(id);
            return Err(RendererError::ShaderLink { log });
        }

        Ok(Self { id })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn uniform_location(&self, name: &str) -> Result<GLint> {
        let c_name = CString::new(name)?;
        match gl::GetUniformLocation(self.id, c_name.as_ptr()) {
            -1 => Err(RendererError::MissingUniform(name.to_owned())),
            loc => Ok(loc),
        }
    }

    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn attrib_location(&self, name: &str) -> Result<GLuint> {
        let c_name = CString::new(name)?;
        match gl::GetAttribLocation(self.id, c_name.as_ptr()) {
            -1 => Err(RendererError::MissingAttribute(name.to_owned())),
            loc => Ok(loc as GLuint),
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if self.id != 0 {
            unsafe { gl::DeleteProgram(self.id) };
            self.id = 0;
        }
    }
}

/// Emplacements des uniforms du shader de bullets.
#[derive(Debug, Clone, Copy)]
pub struct BulletUniforms {
    pub focal_point: GLint,
    pub zoom: GLint,
    pub tex: GLint,
}

/// Emplacements des attributs de sommets du shader de bullets.
#[derive(Debug, Clone, Copy)]
pub struct BulletAttributes {
    pub position: GLuint,
    pub texcoord: GLuint,
    pub color: GLuint,
}

/// Programme de rendu des bullets avec ses emplacements déjà résolus.
#[derive(Debug)]
pub struct BulletProgram {
    pub program: ShaderProgram,
    pub uniforms: BulletUniforms,
    pub attributes: BulletAttributes,
}

impl BulletProgram {
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn new(vertex_src: &str, fragment_src: &str) -> Result<Self> {
        let program = ShaderProgram::from_sources(vertex_src, fragment_src)?;

        let uniforms = BulletUniforms {
            focal_point: program.uniform_location("focal_point")?,
            zoom: program.uniform_location("zoom")?,
            tex: program.uniform_location("tex")?,
        };
        let attributes = BulletAttributes {
            position: program.attrib_location("position")?,
            texcoord: program.attrib_location("texcoord")?,
            color: program.attrib_location("color")?,
        };

        info!(
            "✅ Bullet program {} linked (attributes: position={}, texcoord={}, color={})",
            program.id(),
            attributes.position,
            attributes.texcoord,
            attributes.color
        );

        Ok(Self {
            program,
            uniforms,
            attributes,
        })
    }

    /// Programme construit depuis les fichiers d'`assets/` (ou les sources embarquées).
    ///
    /// # Safety
    /// Un contexte OpenGL valide doit être courant sur ce thread.
    pub unsafe fn load() -> Result<Self> {
        let (vertex_src, fragment_src) = bullet_shader_sources();
        Self::new(&vertex_src, &fragment_src)
    }
}

fn stage_name(ty: GLenum) -> &'static str {
    match ty {
        gl::VERTEX_SHADER => "vertex",
        gl::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

unsafe fn compile_shader(src: &str, ty: GLenum) -> Result<GLuint> {
    let c_src = CString::new(src)?;

    let shader = gl::CreateShader(ty);
    gl::ShaderSource(shader, 1, &c_src.as_ptr(), ptr::null());
    gl::CompileShader(shader);

    let mut success = gl::FALSE as GLint;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    if success != gl::TRUE as GLint {
        let mut log = info_log(shader, gl::GetShaderiv, gl::GetShaderInfoLog);
        gl::DeleteShader(shader);

        if let Some(line) = parse_glsl_error_line(&log) {
            log.push_str(&format_glsl_error_context(src, line));
        }
        return Err(RendererError::ShaderCompile {
            stage: stage_name(ty),
            log,
        });
    }
    Ok(shader)
}

/// Récupère le log d'un shader ou d'un programme.
unsafe fn info_log(
    id: GLuint,
    get_iv: unsafe fn(GLuint, GLenum, *mut GLint),
    get_info_log: unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar),
) -> String {
    let mut len: GLint = 0;
    get_iv(id, gl::INFO_LOG_LENGTH, &mut len);
    if len <= 0 {
        return String::new();
    }

    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    get_info_log(id, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(written.max(0) as usize);

    String::from_utf8_lossy(&buf)
        .trim_matches(char::from(0))
        .trim_end()
        .to_owned()
}

/// Extrait le numéro de ligne d'une erreur GLSL, selon les formats des principaux pilotes.
fn parse_glsl_error_line(log: &str) -> Option<usize> {
    GLSL_ERROR_PATTERNS.iter().find_map(|re| {
        re.captures(log)
            .and_then(|cap| cap.name("line"))
            .and_then(|m| m.as_str().parse::<usize>().ok())
    })
}

/// Extrait du code GLSL autour de la ligne fautive (2 lignes avant/après).
fn format_glsl_error_context(src: &str, line_number: usize) -> String {
    const CONTEXT: usize = 2;

    let lines: Vec<&str> = src.lines().collect();
    if lines.is_empty() || line_number == 0 || line_number > lines.len() {
        return String::new();
    }

    let first = line_number.saturating_sub(CONTEXT).max(1);
    let last = (line_number + CONTEXT).min(lines.len());

    let mut output = format!("\n🔍 Error context (line {}):\n", line_number);
    for current in first..=last {
        let line = lines[current - 1];
        if current == line_number {
            output.push_str(&format!("> {:>3} | {}\n", current, line));
            output.push_str(&format!("        {}\n", "^".repeat(line.len().min(80))));
        } else {
            output.push_str(&format!("  {:>3} | {}\n", current, line));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glsl_error_line_vendor_formats() {
        // Mesa/Intel
        assert_eq!(
            parse_glsl_error_line("0:12(105): error: undefined variable"),
            Some(12)
        );
        // NVIDIA
        assert_eq!(
            parse_glsl_error_line("0(12) : error C1000: undefined variable"),
            Some(12)
        );
        // AMD
        assert_eq!(
            parse_glsl_error_line("ERROR: 0:12: 'undefined_var' : undeclared identifier"),
            Some(12)
        );
        assert_eq!(parse_glsl_error_line("Error: some error without line info"), None);
        assert_eq!(parse_glsl_error_line(""), None);
    }

    #[test]
    fn test_parse_glsl_error_line_first_match_wins() {
        assert_eq!(
            parse_glsl_error_line("0:5(10): error and 0:6(20): another"),
            Some(5)
        );
        assert_eq!(
            parse_glsl_error_line("0:10(2): error: 'toto' undeclared\0"),
            Some(10)
        );
    }

    #[test]
    fn test_format_glsl_error_context_marks_faulty_line() {
        let out = format_glsl_error_context(BULLET_VERTEX_SHADER_SRC, 3);
        assert!(out.contains("Error context (line 3)"));
        assert!(out.contains(">   3 |"));
        assert!(out.contains("^"));
    }

    #[test]
    fn test_format_glsl_error_context_edges() {
        assert_eq!(format_glsl_error_context("", 1), "");
        assert_eq!(format_glsl_error_context("a\nb", 0), "");
        assert_eq!(format_glsl_error_context("a\nb", 100), "");

        let src = "line1\nline2\nline3\nline4\nline5";
        let first = format_glsl_error_context(src, 1);
        assert!(first.contains(">   1 | line1"));
        assert!(first.contains("    3 | line3"));
        assert!(!first.contains("line4"));

        let last = format_glsl_error_context(src, 5);
        assert!(last.contains(">   5 | line5"));
        assert!(last.contains("    3 | line3"));
        assert!(!last.contains("line2"));
    }

    #[test]
    fn test_embedded_shaders_declare_expected_interface() {
        for name in ["focal_point", "zoom", "position", "texcoord", "color"] {
            assert!(
                BULLET_VERTEX_SHADER_SRC.contains(name),
                "vertex shader misses {name}"
            );
        }
        assert!(BULLET_FRAGMENT_SHADER_SRC.contains("uniform sampler2D tex"));
    }

    #[test]
    fn test_missing_shader_files_fall_back_to_embedded() {
        let (vs, fs) = shader_sources_or_embedded(
            "does/not/exist.vert",
            "does/not/exist.frag",
            ("void main() {}", "out vec4 c;"),
        );
        assert_eq!(vs, "void main() {}");
        assert_eq!(fs, "out vec4 c;");
    }
}
