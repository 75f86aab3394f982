//! Safe wrapper around libmpg123's feed-mode decoder.

use std::ffi::{CStr, c_char, c_int, c_long};
use std::sync::Once;

use super::{EngineError, EngineStep, FeedEngine, RawFormat};

// ======================== FFI declarations ========================

/// Opaque type for mpg123_handle
#[repr(C)]
pub struct Mpg123Handle {
    _private: [u8; 0],
}

// Status codes (enum mpg123_errors)
const MPG123_OK: c_int = 0;
const MPG123_NEED_MORE: c_int = -10;
const MPG123_NEW_FORMAT: c_int = -11;

unsafe extern "C" {
    fn mpg123_init() -> c_int;
    fn mpg123_new(decoder: *const c_char, error: *mut c_int) -> *mut Mpg123Handle;
    fn mpg123_delete(mh: *mut Mpg123Handle);
    fn mpg123_open_feed(mh: *mut Mpg123Handle) -> c_int;
    fn mpg123_close(mh: *mut Mpg123Handle) -> c_int;
    fn mpg123_decode(
        mh: *mut Mpg123Handle,
        inmemory: *const u8,
        inmemsize: usize,
        outmemory: *mut u8,
        outmemsize: usize,
        done: *mut usize,
    ) -> c_int;
    fn mpg123_getformat(
        mh: *mut Mpg123Handle,
        rate: *mut c_long,
        channels: *mut c_int,
        encoding: *mut c_int,
    ) -> c_int;
    fn mpg123_plain_strerror(errcode: c_int) -> *const c_char;
}

// ======================== Library setup ========================

static LIBRARY_INIT: Once = Once::new();

/// Process-wide mpg123 initialization. The library defines no matching
/// teardown, so there is none here either.
fn init_library() {
    LIBRARY_INIT.call_once(|| unsafe {
        mpg123_init();
    });
}

fn plain_strerror(code: c_int) -> String {
    let msg = unsafe { mpg123_plain_strerror(code) };
    if msg.is_null() {
        format!("unknown engine error {}", code)
    } else {
        unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
    }
}

// ======================== Feed-mode decoder ========================

/// Safe wrapper around one mpg123 decoder handle opened in feed mode.
///
/// Feed mode means the decoder never touches a file or socket itself; all
/// compressed input arrives through [`FeedEngine::decode`] pushes.
pub struct Mpg123Engine {
    handle: *mut Mpg123Handle,
}

// The handle is used from a single thread only
unsafe impl Send for Mpg123Engine {}

impl Mpg123Engine {
    /// Create a decoder instance and switch it into feed mode.
    pub fn new() -> Result<Self, EngineError> {
        init_library();

        let mut err: c_int = 0;
        let handle = unsafe { mpg123_new(std::ptr::null(), &mut err) };
        if handle.is_null() {
            log::error!("Unable to create mpg123 handle: {}", plain_strerror(err));
            return Err(EngineError::Init(err));
        }

        let ret = unsafe { mpg123_open_feed(handle) };
        if ret != MPG123_OK {
            log::error!("Unable to open feed: {}", plain_strerror(ret));
            unsafe { mpg123_delete(handle) };
            return Err(EngineError::Mode(ret));
        }

        Ok(Self { handle })
    }
}

impl FeedEngine for Mpg123Engine {
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> EngineStep {
        let mut done: usize = 0;
        let ret = unsafe {
            mpg123_decode(
                self.handle,
                input.as_ptr(),
                input.len(),
                output.as_mut_ptr(),
                output.len(),
                &mut done,
            )
        };

        match ret {
            MPG123_OK => EngineStep::Decoded(done),
            MPG123_NEW_FORMAT => EngineStep::FormatDetermined,
            MPG123_NEED_MORE => EngineStep::NeedMore,
            code => {
                log::error!("mpg123_decode failed: {}", plain_strerror(code));
                EngineStep::Failed(code)
            }
        }
    }

    fn format(&mut self) -> Result<RawFormat, i32> {
        let mut rate: c_long = 0;
        let mut channels: c_int = 0;
        let mut encoding: c_int = 0;
        let ret = unsafe {
            mpg123_getformat(self.handle, &mut rate, &mut channels, &mut encoding)
        };
        if ret != MPG123_OK {
            log::error!("mpg123_getformat failed: {}", plain_strerror(ret));
            return Err(ret);
        }
        Ok(RawFormat {
            rate: rate as i64,
            channels,
            encoding,
        })
    }
}

impl Drop for Mpg123Engine {
    fn drop(&mut self) {
        unsafe {
            mpg123_close(self.handle);
            mpg123_delete(self.handle);
        }
    }
}
