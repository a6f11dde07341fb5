//! 단일 인스턴스 잠금
//!
//! 이미 실행 중인 인스턴스가 있으면 새 인스턴스는 수명주기 신호가 없어도
//! 종료를 요청합니다. Windows는 이름 있는 뮤텍스(`Local\<id>`),
//! 그 외 플랫폼은 임시 디렉터리의 `<id>.lock` 파일에 `flock`을 겁니다.

use std::io;
#[cfg(unix)]
use std::path::Path;

/// 보유하는 동안 같은 id의 다른 프로세스는 획득에 실패
#[derive(Debug)]
pub struct SingleInstance {
    #[cfg(windows)]
    handle: winapi::um::winnt::HANDLE,
    #[cfg(unix)]
    _file: std::fs::File,
}

#[cfg(windows)]
impl SingleInstance {
    /// 첫 인스턴스면 `Some(guard)`, 다른 인스턴스가 있으면 `None`
    pub fn acquire(id: &str) -> io::Result<Option<Self>> {
        use winapi::shared::winerror::ERROR_ALREADY_EXISTS;
        use winapi::um::errhandlingapi::GetLastError;
        use winapi::um::handleapi::CloseHandle;
        use winapi::um::synchapi::CreateMutexW;

        let name: Vec<u16> = format!("Local\\{}", id)
            .encode_utf16()
            .chain(std::iter::once(0))
            .collect();
        let handle = unsafe { CreateMutexW(std::ptr::null_mut(), 0, name.as_ptr()) };
        if handle.is_null() {
            return Err(io::Error::last_os_error());
        }
        if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
            unsafe { CloseHandle(handle) };
            return Ok(None);
        }
        Ok(Some(Self { handle }))
    }
}

#[cfg(windows)]
impl Drop for SingleInstance {
    fn drop(&mut self) {
        unsafe { winapi::um::handleapi::CloseHandle(self.handle) };
    }
}

#[cfg(unix)]
impl SingleInstance {
    /// 첫 인스턴스면 `Some(guard)`, 다른 인스턴스가 있으면 `None`
    pub fn acquire(id: &str) -> io::Result<Option<Self>> {
        Self::acquire_at(&std::env::temp_dir().join(format!("{}.lock", id)))
    }

    /// 지정한 잠금 파일로 획득. 파일 닫힘과 함께 해제
    pub fn acquire_at(path: &Path) -> io::Result<Option<Self>> {
        use nix::errno::Errno;
        use nix::fcntl::{flock, FlockArg};
        use std::os::unix::io::AsRawFd;

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
        match flock(file.as_raw_fd(), FlockArg::LockExclusiveNonblock) {
            Ok(()) => Ok(Some(Self { _file: file })),
            Err(e) if e == Errno::EWOULDBLOCK => Ok(None),
            Err(e) => Err(io::Error::from(e)),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn second_holder_is_refused_until_first_drops() {
        let dir = tempfile::tempdir().unwrap();
        let lock = dir.path().join("wire.lock");

        let first = SingleInstance::acquire_at(&lock).unwrap();
        assert!(first.is_some());
        assert!(SingleInstance::acquire_at(&lock).unwrap().is_none());

        drop(first);
        assert!(SingleInstance::acquire_at(&lock).unwrap().is_some());
    }

    #[test]
    fn distinct_ids_do_not_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let a = SingleInstance::acquire_at(&dir.path().join("a.lock")).unwrap();
        let b = SingleInstance::acquire_at(&dir.path().join("b.lock")).unwrap();
        assert!(a.is_some() && b.is_some());
    }

    #[test]
    fn missing_lock_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let lock = dir.path().join("no-such-dir").join("wire.lock");
        assert!(SingleInstance::acquire_at(&lock).is_err());
    }
}
