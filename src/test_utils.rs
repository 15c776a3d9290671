use alloc::vec::Vec;

use crate::interface::RegisterInterface;
use crate::register::{COMMAND, COMMAND_WRITE_LOCK, INTERRUPT_MASK, WRITE_UNLOCK};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockError;

/// One register-level bus transaction
#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    Write { register: u8, data: Vec<u8> },
    Read { register: u8, len: usize },
}

/// Recording interface emulating the page-select protocol and page memory
#[derive(Debug)]
pub struct MockInterface {
    pub transactions: Vec<Transaction>,
    pages: [[u8; 256]; 4],
    common: [u8; 256],
    page: u8,
    unlocked: bool,
    fail_at: Option<usize>,
}

impl MockInterface {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            pages: [[0; 256]; 4],
            common: [0; 256],
            page: 0,
            unlocked: false,
            fail_at: None,
        }
    }

    /// Fail the transaction with index `n` (0-based, counted from now on)
    pub fn fail_at(&mut self, n: usize) {
        self.fail_at = Some(self.transactions.len() + n);
    }

    /// Preload a register as if the device had set it
    pub fn preset(&mut self, address: u16, value: u8) {
        self.pages[(address >> 8) as usize][(address & 0xFF) as usize] = value;
    }

    pub fn preset_common(&mut self, register: u8, value: u8) {
        self.common[register as usize] = value;
    }

    /// Current content of a page
    pub fn page(&self, page: u8) -> &[u8; 256] {
        &self.pages[page as usize]
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    /// Writes that are not part of a page select
    pub fn data_writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                Transaction::Write { register, data }
                    if *register != COMMAND && *register != COMMAND_WRITE_LOCK =>
                {
                    Some((*register, data.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Pages selected, in order
    pub fn page_selects(&self) -> Vec<u8> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                Transaction::Write { register, data } if *register == COMMAND => {
                    Some(data[0])
                }
                _ => None,
            })
            .collect()
    }

    pub fn reads(&self) -> usize {
        self.transactions
            .iter()
            .filter(|t| matches!(t, Transaction::Read { .. }))
            .count()
    }

    fn check_failure(&mut self) -> Result<(), MockError> {
        if self.fail_at == Some(self.transactions.len()) {
            self.fail_at = None;
            return Err(MockError);
        }
        Ok(())
    }
}

impl RegisterInterface for MockInterface {
    type Error = MockError;

    fn write(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.transactions.push(Transaction::Write {
            register,
            data: data.to_vec(),
        });

        match register {
            COMMAND_WRITE_LOCK => {
                self.unlocked = data.first() == Some(&WRITE_UNLOCK);
            }
            COMMAND => {
                // A locked command register ignores the write
                if self.unlocked {
                    self.page = data[0];
                }
                self.unlocked = false;
            }
            r if r >= INTERRUPT_MASK => {
                self.common[r as usize] = data[0];
            }
            r => {
                let page = &mut self.pages[self.page as usize];
                for (i, byte) in data.iter().enumerate() {
                    page[r as usize + i] = *byte;
                }
            }
        }
        Ok(())
    }

    fn read(&mut self, register: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.transactions.push(Transaction::Read {
            register,
            len: data.len(),
        });

        let source = if register >= INTERRUPT_MASK {
            &self.common
        } else {
            &self.pages[self.page as usize]
        };
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = source[register as usize + i];
        }
        Ok(())
    }
}
